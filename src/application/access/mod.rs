use crate::domain::users::user::{Designation, Role};

/// How far a caller's read visibility reaches over the file store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Only files the caller owns.
    OwnOnly,
    /// Own files plus every student-owned file.
    OwnAndStudents,
    /// Own files, every student-owned file, and files owned by staff
    /// holding exactly the given designation.
    OwnStudentsAndTier(Designation),
    /// The whole store.
    Everything,
}

// Repositories translate the scope into SQL predicates. This module
// intentionally avoids depending on persistence or presentation types.

/// Maps a caller's role and designation to a visibility scope.
///
/// Oversight is per adjacent tier, not cumulative down the chain: a dean
/// sees HOD files but not faculty files, an HOD sees faculty files but
/// not dean files. Staff without a designation fall back to own-only.
pub fn scope_for(role: Role, designation: Option<Designation>) -> VisibilityScope {
    match (role, designation) {
        (Role::Student, _) => VisibilityScope::OwnOnly,
        (Role::Staff, Some(Designation::Principal)) => VisibilityScope::Everything,
        (Role::Staff, Some(Designation::Dean)) => {
            VisibilityScope::OwnStudentsAndTier(Designation::Hod)
        }
        (Role::Staff, Some(Designation::Hod)) => {
            VisibilityScope::OwnStudentsAndTier(Designation::Faculty)
        }
        (Role::Staff, Some(Designation::Faculty)) => VisibilityScope::OwnAndStudents,
        (Role::Staff, None) => VisibilityScope::OwnOnly,
    }
}
