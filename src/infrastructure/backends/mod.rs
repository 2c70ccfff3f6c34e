pub mod query;
pub mod recommend;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> BackendBox {
        match name {
            BackendName::Query => return Box::<query::Query>::default(),
            BackendName::Recommend => return Box::<recommend::Recommend>::default(),
        }
    }
}
