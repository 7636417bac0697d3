use std::sync::Arc;

use chanolja::domain::{entities::branches::BranchEntity, repositories::branches::BranchRepository};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BranchError {
    #[error("지점을 찾을 수 없습니다")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BranchError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BranchError::NotFound => StatusCode::NOT_FOUND,
            BranchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, BranchError>;

pub struct BranchUseCase<B>
where
    B: BranchRepository + Send + Sync + 'static,
{
    branch_repo: Arc<B>,
}

impl<B> BranchUseCase<B>
where
    B: BranchRepository + Send + Sync + 'static,
{
    pub fn new(branch_repo: Arc<B>) -> Self {
        Self { branch_repo }
    }

    pub async fn get_branch(&self, id: Uuid) -> UseCaseResult<BranchEntity> {
        self.branch_repo
            .find_branch_by_id(id)
            .await
            .map_err(|err| {
                error!(branch_id = %id, db_error = ?err, "branches: lookup failed");
                BranchError::Internal(err)
            })?
            .ok_or(BranchError::NotFound)
    }

    pub async fn list_branches(&self) -> UseCaseResult<Vec<BranchEntity>> {
        self.branch_repo.list_active_branches().await.map_err(|err| {
            error!(db_error = ?err, "branches: listing failed");
            BranchError::Internal(err)
        })
    }

    /// Resolves a micro-site slug to a branch. The slug may be the
    /// subdomain, the full branch name, or the name without its "지점"
    /// suffix; as a last resort the first prefix match wins.
    pub async fn resolve_branch(&self, slug: &str) -> UseCaseResult<BranchEntity> {
        let slug = slug.trim();

        if let Some(branch) = self
            .branch_repo
            .find_branch_by_subdomain(slug)
            .await
            .map_err(BranchError::Internal)?
        {
            return Ok(branch);
        }

        if let Some(branch) = self
            .branch_repo
            .find_branch_by_name(slug)
            .await
            .map_err(BranchError::Internal)?
        {
            return Ok(branch);
        }

        if let Some(stripped) = slug.strip_suffix("지점") {
            if let Some(branch) = self
                .branch_repo
                .find_branch_by_name(stripped)
                .await
                .map_err(BranchError::Internal)?
            {
                return Ok(branch);
            }
        }

        let candidates = self
            .branch_repo
            .search_branches_by_name_prefix(slug)
            .await
            .map_err(BranchError::Internal)?;

        match candidates.into_iter().next() {
            Some(branch) => {
                info!(slug, branch_id = %branch.id, "branches: resolved slug by prefix");
                Ok(branch)
            }
            None => {
                let err = BranchError::NotFound;
                warn!(
                    slug,
                    status = err.status_code().as_u16(),
                    "branches: no branch for slug"
                );
                Err(err)
            }
        }
    }
}
