//! Keeps `identity.owner` equal to the holder of the name's live token.
//!
//! Only genuine transfers (holder to holder) are considered. Mints and burns
//! are driven by the lease lifecycle, which writes the owner itself. A token
//! superseded by reclaim is no longer bound to its name, so moving it never
//! touches the current registration.

use soul_types::AuditEventKind;
use tracing::{debug, info};

use crate::ledger::{HolderChange, OwnershipObserver};
use crate::store::IdentityStore;

pub struct OwnershipSync<'a> {
    store: &'a mut IdentityStore,
    events: &'a mut Vec<AuditEventKind>,
}

impl<'a> OwnershipSync<'a> {
    pub fn new(store: &'a mut IdentityStore, events: &'a mut Vec<AuditEventKind>) -> Self {
        Self { store, events }
    }
}

impl OwnershipObserver for OwnershipSync<'_> {
    fn holder_changed(&mut self, change: &HolderChange) {
        let Some((from, to)) = change.as_transfer() else {
            return;
        };
        self.events.push(AuditEventKind::TokenTransferred {
            token_id: change.token_id,
            from,
            to,
        });

        let Some(hash) = self.store.live_token_binding(&change.token_id) else {
            debug!(token = %change.token_id, "Transfer of unbound token, identity untouched");
            return;
        };
        let name = self.store.name_of(&hash).unwrap_or_default().to_string();
        if let Some(record) = self.store.get_mut(&hash) {
            let previous = std::mem::replace(&mut record.owner, to);
            info!(name = %name, token = %change.token_id, from = %previous, to = %to, "Identity owner synced");
            self.events.push(AuditEventKind::OwnershipTransferred {
                name,
                token_id: change.token_id,
                from: previous,
                to,
            });
        }
    }
}
