//! Role service - CRUD operations for roles

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::role::validate_role_against_config;
use crate::domain::{
    ConfigRepository, DomainError, Role, RoleName, RoleRepository, RoleWriteRequest,
};

/// Result of an upsert
#[derive(Debug, Clone)]
pub struct SavedRole {
    pub role: Role,
    pub created: bool,
}

/// Role service for CRUD operations
#[derive(Debug)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    config: Arc<dyn ConfigRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, config: Arc<dyn ConfigRepository>) -> Self {
        Self { roles, config }
    }

    /// Get a role by name, returning an error if not found
    pub async fn get(&self, name: &str) -> Result<Role, DomainError> {
        let role_name = parse_role_name(name)?;

        self.roles
            .get(&role_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role '{}' not found", role_name)))
    }

    /// List role names, sorted
    pub async fn list(&self) -> Result<Vec<RoleName>, DomainError> {
        self.roles.list_names().await
    }

    /// Create the role if absent, otherwise update the supplied fields.
    ///
    /// Creation requires an issuer. In both cases the resulting role is
    /// validated against the current issuer config before it is stored.
    pub async fn upsert(
        &self,
        name: &str,
        request: RoleWriteRequest,
    ) -> Result<SavedRole, DomainError> {
        let role_name = parse_role_name(name)?;

        let (role, created) = match self.roles.get(&role_name).await? {
            Some(mut existing) => {
                existing.apply(request)?;
                (existing, false)
            }
            None => (Role::from_request(role_name.clone(), request)?, true),
        };

        let config = self.config.get().await?;
        validate_role_against_config(&role, &config)?;

        let role = self.roles.save(role).await?;

        info!(role = %role_name, created, issuer = %role.issuer(), "Saved role");

        Ok(SavedRole { role, created })
    }

    /// Delete a role. Tokens already issued under it stay valid.
    pub async fn delete(&self, name: &str) -> Result<bool, DomainError> {
        let role_name = parse_role_name(name)?;
        let deleted = self.roles.delete(&role_name).await?;

        if deleted {
            info!(role = %role_name, "Deleted role");
        } else {
            debug!(role = %role_name, "Delete of absent role");
        }

        Ok(deleted)
    }
}

fn parse_role_name(name: &str) -> Result<RoleName, DomainError> {
    Ok(RoleName::new(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::mock::MockRoleRepository;
    use crate::domain::{ConfigUpdate, IssuerConfig};
    use crate::infrastructure::config::StorageConfigRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use serde_json::json;

    struct Fixture {
        service: RoleService,
        config: Arc<StorageConfigRepository>,
    }

    fn create_service() -> Fixture {
        let config = Arc::new(StorageConfigRepository::new(Arc::new(
            InMemoryStorage::<IssuerConfig>::new(),
        )));
        let service = RoleService::new(Arc::new(MockRoleRepository::new()), config.clone());

        Fixture { service, config }
    }

    fn request(value: serde_json::Value) -> RoleWriteRequest {
        serde_json::from_value(value).unwrap()
    }

    async fn allow_claims(config: &StorageConfigRepository, claims: &[&str]) {
        let mut current = config.get().await.unwrap();
        current
            .apply(ConfigUpdate {
                allowed_claims: Some(claims.iter().map(|c| c.to_string()).collect()),
                ..Default::default()
            })
            .unwrap();
        config.save(current).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let fixture = create_service();

        let saved = fixture
            .service
            .upsert("Tester", request(json!({ "issuer": "tester.example.com" })))
            .await
            .unwrap();

        assert!(saved.created);
        assert_eq!(saved.role.name().as_str(), "tester");

        let role = fixture.service.get("tester").await.unwrap();
        assert_eq!(role.issuer(), "tester.example.com");
        assert!(role.claims().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_issuer() {
        let fixture = create_service();

        let result = fixture
            .service
            .upsert("tester", request(json!({ "claims": {} })))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(fixture.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let fixture = create_service();
        fixture
            .service
            .upsert(
                "tester",
                request(json!({ "issuer": "tester.example.com", "subject_pattern": "^u-" })),
            )
            .await
            .unwrap();

        let saved = fixture
            .service
            .upsert("tester", request(json!({ "max_audiences": 4 })))
            .await
            .unwrap();

        assert!(!saved.created);
        assert_eq!(saved.role.issuer(), "tester.example.com");
        assert_eq!(saved.role.subject_pattern().unwrap().as_str(), "^u-");
        assert_eq!(saved.role.max_audiences(), Some(4));
    }

    #[tokio::test]
    async fn test_reserved_claim_rejected_at_write() {
        let fixture = create_service();

        let result = fixture
            .service
            .upsert(
                "tester",
                request(json!({ "issuer": "tester.example.com", "claims": { "sub": "x" } })),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_claims_checked_against_current_config() {
        let fixture = create_service();
        let write = || request(json!({ "issuer": "tester.example.com", "claims": { "foo": "bar" } }));

        assert!(fixture.service.upsert("tester", write()).await.is_err());

        allow_claims(&fixture.config, &["foo"]).await;
        assert!(fixture.service.upsert("tester", write()).await.is_ok());

        // Tightening the policy later leaves the stored role in place
        allow_claims(&fixture.config, &[]).await;
        let role = fixture.service.get("tester").await.unwrap();
        assert_eq!(role.claims().get("foo"), Some(&json!("bar")));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_stored_role() {
        let fixture = create_service();
        fixture
            .service
            .upsert("tester", request(json!({ "issuer": "tester.example.com" })))
            .await
            .unwrap();

        let result = fixture
            .service
            .upsert(
                "tester",
                request(json!({ "issuer": "other.example.com", "claims": { "exp": 1 } })),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(
            fixture.service.get("tester").await.unwrap().issuer(),
            "tester.example.com"
        );
    }

    #[tokio::test]
    async fn test_get_missing_and_invalid_names() {
        let fixture = create_service();

        assert!(matches!(
            fixture.service.get("absent").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            fixture.service.get("bad name").await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let fixture = create_service();
        fixture
            .service
            .upsert("tester", request(json!({ "issuer": "tester.example.com" })))
            .await
            .unwrap();

        assert!(fixture.service.delete("tester").await.unwrap());
        assert!(!fixture.service.delete("tester").await.unwrap());
        assert!(fixture.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let fixture = create_service();
        for name in ["web", "api", "batch"] {
            fixture
                .service
                .upsert(name, request(json!({ "issuer": "issuer.example.com" })))
                .await
                .unwrap();
        }

        let names: Vec<String> = fixture
            .service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(names, vec!["api", "batch", "web"]);
    }
}
