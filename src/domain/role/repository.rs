//! Role repository trait

use async_trait::async_trait;

use super::entity::{Role, RoleName};
use crate::domain::DomainError;

/// Repository for managing roles
#[async_trait]
pub trait RoleRepository: Send + Sync + std::fmt::Debug {
    /// Get a role by name
    async fn get(&self, name: &RoleName) -> Result<Option<Role>, DomainError>;

    /// Create or overwrite a role
    async fn save(&self, role: Role) -> Result<Role, DomainError>;

    /// Delete a role by name
    async fn delete(&self, name: &RoleName) -> Result<bool, DomainError>;

    /// List role names, sorted
    async fn list_names(&self) -> Result<Vec<RoleName>, DomainError>;

    /// Check if a role exists
    async fn exists(&self, name: &RoleName) -> Result<bool, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockRoleRepository;
    use super::*;

    fn role(name: &str) -> Role {
        Role::new(RoleName::new(name).unwrap(), format!("{}.example.com", name)).unwrap()
    }

    #[tokio::test]
    async fn test_mock_save_and_get() {
        let repo = MockRoleRepository::new();
        repo.save(role("tester")).await.unwrap();

        let fetched = repo.get(&RoleName::new("tester").unwrap()).await.unwrap();
        assert_eq!(fetched.unwrap().issuer(), "tester.example.com");
    }

    #[tokio::test]
    async fn test_mock_list_sorted() {
        let repo = MockRoleRepository::new();
        repo.save(role("zeta")).await.unwrap();
        repo.save(role("alpha")).await.unwrap();

        let names = repo.list_names().await.unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_mock_delete() {
        let repo = MockRoleRepository::new();
        let name = RoleName::new("tester").unwrap();
        repo.save(role("tester")).await.unwrap();

        assert!(repo.delete(&name).await.unwrap());
        assert!(!repo.exists(&name).await.unwrap());
        assert!(!repo.delete(&name).await.unwrap());
    }
}
