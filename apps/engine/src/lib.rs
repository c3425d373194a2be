//! Composition root of the clinic engine. Wires the configuration,
//! the shared REST client, the availability cache and the notification
//! center into the cell services an interface layer embeds.

pub mod telemetry;

use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;

use appointment_cell::AppointmentService;
use directory_cell::{PatientService, SpecialistService};
use notify_cell::{NotificationCenter, NotificationSink};
use records_cell::{CertificateService, ExamService, MedicalRecordService, PrescriptionService};
use scheduling_cell::{AvailabilityCache, AvailabilityService};
use shared_api::ApiClient;
use shared_config::AppConfig;
use tenant_cell::TenantService;

pub struct Engine {
    pub config: AppConfig,
    pub notifications: Arc<NotificationCenter>,
    pub availability: AvailabilityService,
    pub appointments: AppointmentService,
    pub patients: PatientService,
    pub specialists: SpecialistService,
    pub medical_records: MedicalRecordService,
    pub exams: ExamService,
    pub prescriptions: PrescriptionService,
    pub certificates: CertificateService,
    pub tenant: TenantService,
    cache: Arc<AvailabilityCache>,
}

impl Engine {
    /// Loads `.env` and builds the engine from environment variables.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::new(AppConfig::from_env())
    }

    pub fn new(config: AppConfig) -> Self {
        let api = Arc::new(ApiClient::new(&config));
        let cache = Arc::new(AvailabilityCache::new());
        let notifications = Arc::new(NotificationCenter::new());

        let availability = AvailabilityService::new(api.clone(), cache.clone());
        let appointments = AppointmentService::new(api.clone(), availability.clone());

        info!("Engine assembled for tenant '{}'", config.tenant);

        Self {
            notifications,
            availability,
            appointments,
            patients: PatientService::new(api.clone()),
            specialists: SpecialistService::new(api.clone()),
            medical_records: MedicalRecordService::new(api.clone()),
            exams: ExamService::new(api.clone()),
            prescriptions: PrescriptionService::new(api.clone()),
            certificates: CertificateService::new(api.clone()),
            tenant: TenantService::new(api),
            cache,
            config,
        }
    }

    /// Injects the interface layer's notification port.
    pub fn with_notification_sink(self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifications.set_sink(sink);
        self
    }

    /// The shared `(specialist, date)` availability cache. Exposed for
    /// embedders that need explicit invalidation (e.g. a manual
    /// refresh control).
    pub fn availability_cache(&self) -> &Arc<AvailabilityCache> {
        &self.cache
    }
}
