pub mod accrual;
pub mod plan;
