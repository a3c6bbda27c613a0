pub mod commands;

use clap::ValueEnum;
use morroky_core::MerchantStatus;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliStatus {
    Pending,
    Verified,
}

impl From<CliStatus> for MerchantStatus {
    fn from(s: CliStatus) -> Self {
        match s {
            CliStatus::Pending => MerchantStatus::Pending,
            CliStatus::Verified => MerchantStatus::Verified,
        }
    }
}
