pub mod dataset;
pub mod history;
pub mod id;
pub mod lead;
pub mod report;
pub mod responses;
