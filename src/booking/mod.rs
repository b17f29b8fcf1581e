pub mod report;
pub mod service;
pub mod store;
pub mod tracking;
pub mod types;

pub use report::{branch_scope, DailyReport, DashboardStats, ALL_BRANCHES};
pub use service::BookingService;
pub use store::{ConsignmentStore, JsonFileStore, MemoryStore};
pub use tracking::{build_tracking, TimelineStep, TrackingView};
pub use types::{
    BookingReceipt, BookingRequest, Consignment, ConsignmentStatus, ConsignmentType, Cost,
    Operator, PackageDetails, Receiver, Sender,
};
