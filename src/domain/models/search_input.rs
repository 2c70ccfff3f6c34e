/// The page's search box. It belongs to whatever surface is hosting the
/// assistant, so the query gateway only ever reads from it.
pub trait SearchInput {
    /// Current text of the search box, or `None` when there is no search box.
    fn value(&self) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct SearchBox {
    value: Option<String>,
}

impl SearchBox {
    pub fn new(value: &str) -> SearchBox {
        return SearchBox {
            value: Some(value.to_string()),
        };
    }

    pub fn missing() -> SearchBox {
        return SearchBox { value: None };
    }
}

impl SearchInput for SearchBox {
    fn value(&self) -> Option<String> {
        return self.value.clone();
    }
}
