use crate::error::Result;
use crate::metrics::impurity::Criterion;

#[derive(Clone, Debug, Default)]
pub struct TreeParams {
    pub criterion: Criterion,
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            criterion: Criterion::default(),
        }
    }

    pub fn set_criterion(&mut self, criterion: &str) -> Result<()> {
        self.criterion = criterion.parse()?;
        Ok(())
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }
}
