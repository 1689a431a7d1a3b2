use crate::descriptor::FlagSet;
use crate::error::FlagSchemaError;

impl FlagSet<'_> {
    /// Assign values from environment variables, matched by each flag's env
    /// name.
    ///
    /// Boolean flags are skipped since they have no destination. Flags with no
    /// matching variable are left untouched. Returns how many flags were
    /// assigned.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of
    /// `std::env::vars()`.
    pub fn apply_env(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<usize, FlagSchemaError> {
        let mut applied = 0;

        for (key, value) in vars {
            for flag in self
                .iter_mut()
                .filter(|f| f.has_destination() && f.env() == key)
            {
                flag.assign(&value)?;
                applied += 1;
            }
        }

        tracing::debug!(applied, "applied environment variables");
        Ok(applied)
    }

    /// [`apply_env`](Self::apply_env) against the process environment.
    pub fn apply_process_env(&mut self) -> Result<usize, FlagSchemaError> {
        self.apply_env(std::env::vars())
    }
}
