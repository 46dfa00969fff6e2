use chrono::Local;
use ratatui::widgets::TableState;
use tokio::sync::mpsc;

use crate::client::Product;
use crate::notify::Notifier;
use crate::state::ClientState;
use crate::tui::modals::product_form::ProductFormModal;
use crate::tui::types::{Action, ActionResult, FormMode};

/// Product awaiting a y/n delete confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub id: i64,
    pub name: String,
}

pub struct App {
    pub state: ClientState,
    pub table_state: TableState,
    pub notifier: Notifier,
    pub form_modal: Option<ProductFormModal>,
    pub confirm_delete: Option<PendingDelete>,

    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub result_rx: mpsc::UnboundedReceiver<ActionResult>,
    pub busy: bool,
    pub last_refresh: Option<chrono::DateTime<chrono::Local>>,
}

impl App {
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        result_rx: mpsc::UnboundedReceiver<ActionResult>,
    ) -> Self {
        Self {
            state: ClientState::new(),
            table_state: TableState::default(),
            notifier: Notifier::new(),
            form_modal: None,
            confirm_delete: None,

            should_quit: false,
            action_tx,
            result_rx,
            busy: false,
            last_refresh: None,
        }
    }

    /// Queue an action unless one is already in flight. A refused action is
    /// reported with an error toast.
    pub fn send_action(&mut self, action: Action) -> bool {
        if self.busy {
            self.notifier.error("Another request is in progress");
            return false;
        }
        self.busy = true;
        let _ = self.action_tx.send(action);
        true
    }

    pub fn load(&mut self) {
        self.send_action(Action::Load);
    }

    pub fn handle_result(&mut self, result: ActionResult) {
        self.busy = false;
        match result {
            ActionResult::Loaded(Ok(products)) => {
                self.state.replace(products);
                self.last_refresh = Some(Local::now());
                self.clamp_selection();
            }
            ActionResult::Loaded(Err(e)) => {
                self.notifier.error(format!("Error loading products: {}", e));
            }
            ActionResult::Created(Ok(product)) => {
                self.form_modal = None;
                self.load();
                self.notifier
                    .success(format!("Product \"{}\" added", product.name));
            }
            ActionResult::Created(Err(e)) => {
                self.notifier.error(format!("Error adding product: {}", e));
            }
            ActionResult::Updated(Ok(product)) => {
                self.form_modal = None;
                self.load();
                self.notifier
                    .success(format!("Product \"{}\" updated", product.name));
            }
            ActionResult::Updated(Err(e)) => {
                self.notifier.error(format!("Error updating product: {}", e));
            }
            ActionResult::Deleted {
                name,
                result: Ok(_),
            } => {
                self.load();
                self.notifier.success(format!("Product \"{}\" deleted", name));
            }
            ActionResult::Deleted { result: Err(e), .. } => {
                self.notifier.error(format!("Error deleting product: {}", e));
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.state.is_empty() {
            self.table_state.select(None);
        } else if self.table_state.selected().is_none() {
            self.table_state.select(Some(0));
        } else if let Some(selected) = self.table_state.selected()
            && selected >= self.state.len()
        {
            self.table_state
                .select(Some(self.state.len().saturating_sub(1)));
        }
    }

    pub fn select_next(&mut self) {
        if self.state.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.state.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.state.is_empty() {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.table_state.select(Some(i));
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.table_state
            .selected()
            .and_then(|idx| self.state.get(idx))
    }

    // Add / edit

    pub fn open_add_modal(&mut self) {
        self.form_modal = Some(ProductFormModal::add());
    }

    /// Opens the edit form from the cached record; the server is not asked.
    pub fn open_edit_modal(&mut self, id: i64) {
        match self.state.find(id) {
            Some(product) => self.form_modal = Some(ProductFormModal::edit(product)),
            None => self.notifier.error("Product not found"),
        }
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(id) = self.selected_product().map(|p| p.id) {
            self.open_edit_modal(id);
        }
    }

    pub fn close_form_modal(&mut self) {
        self.form_modal = None;
    }

    /// Validate locally, then send create or update. The modal stays open
    /// until the server accepts the product.
    pub fn submit_form(&mut self) {
        let Some(modal) = &self.form_modal else {
            return;
        };

        let input = match modal.validate() {
            Ok(input) => input,
            Err(e) => {
                self.notifier.error(e.to_string());
                return;
            }
        };

        let action = match modal.mode {
            FormMode::Add => Action::Create(input),
            FormMode::Edit(id) => Action::Update { id, input },
        };
        self.send_action(action);
    }

    // Delete

    pub fn request_delete(&mut self, id: i64) {
        match self.state.find(id) {
            Some(product) => {
                self.confirm_delete = Some(PendingDelete {
                    id,
                    name: product.name.clone(),
                })
            }
            None => self.notifier.error("Product not found"),
        }
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_product().map(|p| p.id) {
            self.request_delete(id);
        }
    }

    /// Send the pending delete. The confirmation stays up if the action is
    /// refused, so it can be confirmed again once the worker is idle.
    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.confirm_delete.clone() else {
            return;
        };
        if self.send_action(Action::Delete {
            id: pending.id,
            name: pending.name,
        }) {
            self.confirm_delete = None;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }
}
