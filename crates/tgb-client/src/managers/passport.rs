use tgb_core::{domain::UserId, types::PassportElementError};

use crate::api::{ApiClient, Call};

#[derive(Clone, Debug)]
pub struct PassportManager {
    client: ApiClient,
}

impl PassportManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The user cannot resubmit the listed elements until the errors are fixed.
    pub fn set_passport_data_errors(
        &self,
        user_id: impl Into<UserId>,
        errors: Vec<PassportElementError>,
    ) -> Call<bool> {
        self.client
            .post("setPassportDataErrors")
            .arg("user_id", user_id.into())
            .arg("errors", errors)
    }
}
