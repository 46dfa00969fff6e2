use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::tui::types::{Action, ActionResult};

/// Runs API calls off the UI task. One action is processed at a time, in
/// the order received.
pub async fn action_worker(
    client: ApiClient,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    result_tx: mpsc::UnboundedSender<ActionResult>,
) {
    while let Some(action) = action_rx.recv().await {
        let result = match action {
            Action::Load => {
                ActionResult::Loaded(client.list_products().await.map_err(|e| e.to_string()))
            }
            Action::Create(input) => ActionResult::Created(
                client
                    .create_product(&input)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Action::Update { id, input } => ActionResult::Updated(
                client
                    .update_product(id, &input)
                    .await
                    .map_err(|e| e.to_string()),
            ),
            Action::Delete { id, name } => ActionResult::Deleted {
                name,
                result: client.delete_product(id).await.map_err(|e| e.to_string()),
            },
        };

        if result_tx.send(result).is_err() {
            break;
        }
    }
}
