pub mod launch;
pub mod logs;
pub mod open;
pub mod scan;
pub mod status;
