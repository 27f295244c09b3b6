use super::{auth, navigate, resources, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Auth(args) => auth::execute(args).await,
        Action::Navigate(args) => navigate::execute(args).await,
        Action::Resources(args) => resources::execute(args).await,
    }
}
