use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::branches::BranchEntity;

#[automock]
#[async_trait]
pub trait BranchRepository {
    async fn find_branch_by_id(&self, id: Uuid) -> Result<Option<BranchEntity>>;

    async fn find_branch_by_subdomain(&self, subdomain: &str) -> Result<Option<BranchEntity>>;

    async fn find_branch_by_name(&self, name: &str) -> Result<Option<BranchEntity>>;

    async fn search_branches_by_name_prefix(&self, prefix: &str) -> Result<Vec<BranchEntity>>;

    async fn list_active_branches(&self) -> Result<Vec<BranchEntity>>;
}
