use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveProductRequest {
    pub product_id: String,
}

pub struct ArchiveProductInteractor {
    deps: UseCaseDeps,
}

impl ArchiveProductInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: ArchiveProductRequest) -> Result<(), UseCaseError> {
        let mut product = self.deps.load(&req.product_id).await?;
        product.archive(self.deps.clock.now())?;
        self.deps.commit("archive_product", &mut product, Persist::Update).await
    }
}
