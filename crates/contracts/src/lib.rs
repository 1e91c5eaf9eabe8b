//! Request/response types shared between the report backend and its clients.

pub mod dashboards;
pub mod enums;
pub mod shared;
