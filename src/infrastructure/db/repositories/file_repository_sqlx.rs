use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use crate::application::access::VisibilityScope;
use crate::application::ports::file_repository::{FileRepository, NewFile};
use crate::domain::files::file::{FileContent, FileKind, StoredFile};
use crate::domain::users::user::{Designation, Role};
use crate::infrastructure::db::DbPool;

pub struct SqlxFileRepository {
    pub pool: DbPool,
}

impl SqlxFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const FILE_COLUMNS: &str = "id, user_id, username, user_role, user_designation, title, type, \
                            category, signature, content, report_date, images, created_at, \
                            downloads_count";

fn row_to_file(r: &SqliteRow) -> anyhow::Result<StoredFile> {
    let kind = FileKind::from_str(&r.get::<String, _>("type"))?;
    let content = match kind {
        FileKind::Report => FileContent::Report(r.get("content")),
        FileKind::Certificate => {
            FileContent::Certificate(serde_json::from_str(&r.get::<String, _>("content"))?)
        }
    };
    let user_designation = r
        .get::<Option<String>, _>("user_designation")
        .map(|s| Designation::from_str(&s))
        .transpose()?;
    let signature = r
        .get::<Option<String>, _>("signature")
        .map(|s| serde_json::from_str(&s))
        .transpose()?;
    let images = r
        .get::<Option<String>, _>("images")
        .map(|s| serde_json::from_str(&s))
        .transpose()?;
    Ok(StoredFile {
        id: Uuid::parse_str(&r.get::<String, _>("id"))?,
        user_id: Uuid::parse_str(&r.get::<String, _>("user_id"))?,
        username: r.get("username"),
        user_role: Role::from_str(&r.get::<String, _>("user_role"))?,
        user_designation,
        title: r.get("title"),
        kind,
        category: r.get("category"),
        signature,
        content,
        report_date: r.get("report_date"),
        images,
        created_at: r.get("created_at"),
        downloads_count: r.get("downloads_count"),
    })
}

#[async_trait]
impl FileRepository for SqlxFileRepository {
    async fn insert(&self, file: NewFile) -> anyhow::Result<StoredFile> {
        let stored = StoredFile {
            id: Uuid::new_v4(),
            user_id: file.user_id,
            username: file.username,
            user_role: file.user_role,
            user_designation: file.user_designation,
            title: file.title,
            kind: file.content.kind(),
            category: file.category,
            signature: file.signature,
            content: file.content,
            report_date: file.report_date,
            images: file.images,
            created_at: Utc::now(),
            downloads_count: 0,
        };
        let content_text = match &stored.content {
            FileContent::Report(html) => html.clone(),
            FileContent::Certificate(cert) => serde_json::to_string(cert)?,
        };
        let signature_text = stored
            .signature
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let images_text = stored
            .images
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        sqlx::query(
            r#"INSERT INTO files (id, user_id, username, user_role, user_designation, title,
                                  type, category, signature, content, report_date, images,
                                  created_at, downloads_count)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, 0)"#,
        )
        .bind(stored.id.to_string())
        .bind(stored.user_id.to_string())
        .bind(stored.username.as_str())
        .bind(stored.user_role.as_str())
        .bind(stored.user_designation.map(Designation::as_str))
        .bind(stored.title.as_str())
        .bind(stored.kind.as_str())
        .bind(stored.category.as_deref())
        .bind(signature_text.as_deref())
        .bind(content_text.as_str())
        .bind(stored.report_date.as_deref())
        .bind(images_text.as_deref())
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn list_visible(
        &self,
        caller: Uuid,
        scope: VisibilityScope,
    ) -> anyhow::Result<Vec<StoredFile>> {
        let rows = match scope {
            VisibilityScope::OwnOnly => {
                sqlx::query(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ?1 ORDER BY created_at DESC"
                ))
                .bind(caller.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            VisibilityScope::OwnAndStudents => {
                sqlx::query(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ?1 OR user_role = ?2 \
                     ORDER BY created_at DESC"
                ))
                .bind(caller.to_string())
                .bind(Role::Student.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            VisibilityScope::OwnStudentsAndTier(tier) => {
                sqlx::query(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ?1 OR user_role = ?2 \
                     OR user_designation = ?3 ORDER BY created_at DESC"
                ))
                .bind(caller.to_string())
                .bind(Role::Student.as_str())
                .bind(tier.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            VisibilityScope::Everything => {
                sqlx::query(&format!(
                    "SELECT {FILE_COLUMNS} FROM files ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(row_to_file).collect()
    }

    async fn owner_of(&self, file_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let row = sqlx::query("SELECT user_id FROM files WHERE id = ?1")
            .bind(file_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => Ok(Some(Uuid::parse_str(&r.get::<String, _>("user_id"))?)),
            None => Ok(None),
        }
    }

    async fn increment_downloads(&self, file_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE files SET downloads_count = downloads_count + 1 WHERE id = ?1")
            .bind(file_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_owned(&self, file_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM files WHERE id = ?1 AND user_id = ?2")
            .bind(file_id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_for_owner(&self, owner_id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM files WHERE user_id = ?1")
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::domain::files::file::{CertificateContent, EmbeddedImage, Signature};
    use crate::domain::users::user::Role;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
    use crate::infrastructure::db::test_support::{memory_pool, mk_user};

    #[tokio::test]
    async fn certificate_payloads_come_back_intact() {
        let pool = memory_pool().await;
        let users = SqlxUserRepository::new(pool.clone());
        let repo = SqlxFileRepository::new(pool);
        let student = mk_user(&users, "Student", "student@demo.com", Role::Student, None).await;

        let mut fields = BTreeMap::new();
        fields.insert("Name".to_string(), "Demo Student".to_string());
        fields.insert("Course".to_string(), "Rust 101".to_string());
        let content = FileContent::Certificate(CertificateContent {
            fields,
            image: Some(EmbeddedImage {
                data: "data:image/png;base64,iVBORw0KGgo=".into(),
                mime_type: Some("image/png".into()),
            }),
            cloud_url: Some("https://cdn.example.com/certs/1.png".into()),
            source_file: Some("cert.png".into()),
        });
        let inserted = repo
            .insert(NewFile {
                user_id: student.id,
                username: student.username.clone(),
                user_role: student.role,
                user_designation: None,
                title: "Rust 101".into(),
                category: Some("course".into()),
                signature: Some(Signature {
                    name: "Registrar".into(),
                    title: "Office of Records".into(),
                }),
                content: content.clone(),
                report_date: None,
                images: None,
            })
            .await
            .unwrap();

        let listed = repo
            .list_visible(student.id, VisibilityScope::OwnOnly)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        let got = &listed[0];
        assert_eq!(got.id, inserted.id);
        assert_eq!(got.kind, FileKind::Certificate);
        assert_eq!(got.content, content);
        assert_eq!(got.signature, inserted.signature);
        assert_eq!(got.created_at, inserted.created_at);
    }

    #[tokio::test]
    async fn missing_files_report_back_as_missing() {
        let pool = memory_pool().await;
        let repo = SqlxFileRepository::new(pool);
        let id = Uuid::new_v4();
        assert!(repo.owner_of(id).await.unwrap().is_none());
        assert!(!repo.increment_downloads(id).await.unwrap());
        assert!(!repo.delete_owned(id, Uuid::new_v4()).await.unwrap());
        assert_eq!(repo.delete_all_for_owner(Uuid::new_v4()).await.unwrap(), 0);
    }
}
