use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            other => anyhow::bail!("unknown role: {other}"),
        }
    }
}

/// Staff tier within the institution. Students never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Designation {
    Faculty,
    Hod,
    Dean,
    Principal,
}

impl Designation {
    pub fn as_str(self) -> &'static str {
        match self {
            Designation::Faculty => "faculty",
            Designation::Hod => "hod",
            Designation::Dean => "dean",
            Designation::Principal => "principal",
        }
    }
}

impl std::str::FromStr for Designation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faculty" => Ok(Designation::Faculty),
            "hod" => Ok(Designation::Hod),
            "dean" => Ok(Designation::Dean),
            "principal" => Ok(Designation::Principal),
            other => anyhow::bail!("unknown designation: {other}"),
        }
    }
}

/// `password_hash` is `None` once the record has been sanitized for
/// callers that must not see credentials.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub designation: Option<Designation>,
}

impl User {
    pub fn sanitized(mut self) -> Self {
        self.password_hash = None;
        self
    }
}
