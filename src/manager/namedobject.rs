use serde::{
    Serialize,
    Deserialize
};

/// 只讀取 `name` 欄位，作為 manager 的 key；其餘欄位交給各自的 parser。
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &String {
        &self.name
    }
}
