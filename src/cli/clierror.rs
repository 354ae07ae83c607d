use thiserror::Error;

use crate::logger::LoggerError;
use crate::manager::managererror::ManagerError;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::montecarlo::piestimator::MonteCarloError;
use crate::render::renderer::RenderError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended before a value was entered")]
    EndOfInput,

    #[error("configuration error: {0}")]
    Manager(#[from] ManagerError),

    #[error("integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("monte carlo error: {0}")]
    MonteCarlo(#[from] MonteCarloError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("logger error: {0}")]
    Logger(#[from] LoggerError)
}
