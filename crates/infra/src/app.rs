//! Application wiring: one place that assembles the command/query surface.

use std::sync::Arc;

use catalog_core::{Clock, SystemClock};
use catalog_events::{InMemoryEventBus, OutboxEnvelope};

use crate::config::CatalogConfig;
use crate::queries::{GetProductQuery, ListProductsQuery};
use crate::relay::OutboxRelay;
use crate::repo::{InMemoryReadModel, StoreOutboxRepository, StoreProductRepository};
use crate::store::InMemoryDatabase;
use crate::usecases::{
    ActivateProductInteractor, ApplyDiscountInteractor, ArchiveProductInteractor,
    CreateProductInteractor, DeactivateProductInteractor, JsonEventSerializer,
    RemoveDiscountInteractor, UpdateProductInteractor, UseCaseDeps,
};

pub type InMemoryRelay = OutboxRelay<Arc<InMemoryEventBus<OutboxEnvelope>>>;

pub struct CatalogApp {
    pub create_product: CreateProductInteractor,
    pub update_product: UpdateProductInteractor,
    pub activate_product: ActivateProductInteractor,
    pub deactivate_product: DeactivateProductInteractor,
    pub archive_product: ArchiveProductInteractor,
    pub apply_discount: ApplyDiscountInteractor,
    pub remove_discount: RemoveDiscountInteractor,

    pub get_product: GetProductQuery,
    pub list_products: ListProductsQuery,

    pub relay: InMemoryRelay,
    pub bus: Arc<InMemoryEventBus<OutboxEnvelope>>,
    pub db: Arc<InMemoryDatabase>,
    pub config: CatalogConfig,
}

impl CatalogApp {
    /// In-memory app with config from `CATALOG_*` variables and wall-clock time.
    pub fn from_env() -> Self {
        Self::in_memory(CatalogConfig::from_env(), Arc::new(SystemClock))
    }

    /// Everything backed by one `InMemoryDatabase`.
    pub fn in_memory(config: CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        let outbox = Arc::new(StoreOutboxRepository::new(db.clone(), clock.clone()));
        let deps = UseCaseDeps {
            products: Arc::new(StoreProductRepository::new(db.clone(), clock.clone())),
            outbox: outbox.clone(),
            committer: db.clone(),
            serializer: Arc::new(JsonEventSerializer),
            clock: clock.clone(),
        };
        let read_model = Arc::new(InMemoryReadModel::new(db.clone(), clock.clone(), config.clone()));
        let bus = Arc::new(InMemoryEventBus::new());
        let relay = OutboxRelay::new(
            outbox.clone(),
            outbox,
            db.clone(),
            bus.clone(),
            clock,
            config.outbox_batch_size,
        );

        tracing::info!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            outbox_batch_size = config.outbox_batch_size,
            "catalog app assembled (in-memory)"
        );

        Self {
            create_product: CreateProductInteractor::new(deps.clone()),
            update_product: UpdateProductInteractor::new(deps.clone()),
            activate_product: ActivateProductInteractor::new(deps.clone()),
            deactivate_product: DeactivateProductInteractor::new(deps.clone()),
            archive_product: ArchiveProductInteractor::new(deps.clone()),
            apply_discount: ApplyDiscountInteractor::new(deps.clone()),
            remove_discount: RemoveDiscountInteractor::new(deps),
            get_product: GetProductQuery::new(read_model.clone()),
            list_products: ListProductsQuery::new(read_model),
            relay,
            bus,
            db,
            config,
        }
    }
}
