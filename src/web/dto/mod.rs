//! Data transfer objects for the Web API.

mod request;
mod response;

pub use request::{
    CreateFinancialRecordRequest, CreateUserRequest, LoginRequest, QrScanRequest,
    UpdateUserRequest,
};
pub use response::{
    ApiResponse, FinancialRecordInfo, LoginResponse, NavigateResponse, ScanHistoryEntry,
    ScanStatsResponse, SessionCheckResponse, SessionUserInfo, UserInfo,
};
