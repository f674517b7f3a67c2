pub mod dedupe;
pub mod email;
pub mod error;
pub mod message;
pub mod response;
pub mod status;
