use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};
use std::sync::Arc;

use serde::Deserialize;

use crate::expression::expression::DomainPolicy;
use crate::expression::parser::ExpressionParser;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::problem::integrationproblem::IntegrationProblem;
use crate::problem::problemmanager::ProblemManager;

/// 未指定 `--config` 時，工作目錄下若有此檔即自動讀取。
pub const DEFAULT_CONFIG_FILE: &str = "numint.json";

/// 全域設定；每個欄位在 JSON 中皆可省略。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 算式中的變數名稱。
    pub variable: String,
    /// 定義域外求值時回報錯誤（strict）或回傳 NaN / inf（ieee）。
    pub domain_policy: DomainPolicy,
    /// tracing 的 level 或 `EnvFilter` 字串；`--log-level` 優先。預設 `warn`，stderr 不干擾互動提示。
    pub log_level: String,
    /// 繪圖時函數曲線的取樣點數。
    pub curve_resolution: usize,
    /// 輸出小數位數。
    pub output_precision: usize,
    /// Monte Carlo 的亂數種子；`None` 時由系統熵產生。
    pub seed: Option<u64>
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            variable: "x".to_owned(),
            domain_policy: DomainPolicy::Strict,
            log_level: "warn".to_owned(),
            curve_resolution: 1000,
            output_precision: 6,
            seed: None
        }
    }
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    problems: Vec<serde_json::Value>
}

pub struct Configuration {
    settings: Settings,
    source: Option<PathBuf>,
    problem_manager_cell: RefCell<Manager<Arc<IntegrationProblem>, ExpressionParser>>
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(Settings::default())
    }
}

impl Configuration {
    pub fn new(settings: Settings) -> Configuration {
        Configuration {
            settings,
            source: None,
            problem_manager_cell: RefCell::new(ProblemManager::new())
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 讀入的設定檔路徑；使用內建預設值時為 `None`。
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn problem_manager(&self) -> RefMut<'_, Manager<Arc<IntegrationProblem>, ExpressionParser>> {
        self.problem_manager_cell.borrow_mut()
    }

    /// 依 `settings` 建立的算式 parser。
    pub fn expression_parser(&self) -> ExpressionParser {
        ExpressionParser::new(self.settings.variable.clone(), self.settings.domain_policy)
    }

    pub fn problem(&self, name: &str) -> Result<Arc<IntegrationProblem>, ManagerError> {
        self.problem_manager().get(name)
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_value(json_value)?;
        let configuration = Configuration::new(json_prop.settings);
        let parser = configuration.expression_parser();
        configuration
            .problem_manager()
            .insert_obj_from_json_vec(&json_prop.problems, &parser)?;
        Ok(configuration)
    }

    pub fn from_reader<P>(file_path: P) -> Result<Configuration, ManagerError> where
        P: AsRef<Path> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        let mut configuration = Configuration::from_json(json_value)?;
        configuration.source = Some(file_path.as_ref().to_path_buf());
        Ok(configuration)
    }

    /// 明確指定的路徑必須存在；未指定時才退回工作目錄下的 `DEFAULT_CONFIG_FILE` 或內建預設值。
    pub fn load(file_path: Option<&Path>) -> Result<Configuration, ManagerError> {
        Configuration::load_in(file_path, Path::new("."))
    }

    fn load_in(file_path: Option<&Path>, working_dir: &Path) -> Result<Configuration, ManagerError> {
        let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
        match file_path {
            Some(path) => Configuration::from_reader(path),
            None if default_path.is_file() => Configuration::from_reader(default_path),
            None => Ok(Configuration::default())
        }
    }
}
