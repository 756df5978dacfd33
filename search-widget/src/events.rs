use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shadowdom::{Document, Event, NodeId};

pub const BUTTON_ACTIVATED: &str = "search-button-activated";
pub const INPUT_CHANGED: &str = "search-input-changed";

/// A notification the widget dispatches on its host, with a typed detail.
pub trait Notification: Serialize + DeserializeOwned {
    const NAME: &'static str;

    /// Decode the payload of an event carrying this notification.
    fn from_event(event: &Event) -> Option<Self> {
        if event.name != Self::NAME {
            return None;
        }
        serde_json::from_value(event.detail.clone()?).ok()
    }

    /// Build the bubbling, composed event carrying this payload.
    fn to_event(&self) -> Result<Event, serde_json::Error> {
        let detail = serde_json::to_value(self)?;
        Ok(Event::custom(Self::NAME, detail).bubbles().composed())
    }
}

/// Detail of [`BUTTON_ACTIVATED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonActivated {
    /// The `button` property, or the text the button displays when the
    /// property is empty.
    pub button: String,
    /// The `value` property.
    pub value: String,
}

impl Notification for ButtonActivated {
    const NAME: &'static str = BUTTON_ACTIVATED;
}

/// Detail of [`INPUT_CHANGED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputChanged {
    /// Live text of the input.
    pub value: String,
}

impl Notification for InputChanged {
    const NAME: &'static str = INPUT_CHANGED;
}

/// Dispatch `payload` on `host`. Runs inside listeners, so failures are
/// logged rather than returned.
pub(crate) fn emit<N: Notification>(doc: &mut Document, host: NodeId, payload: &N) {
    let event = match payload.to_event() {
        Ok(event) => event,
        Err(err) => {
            log::warn!("failed to encode {} payload: {err}", N::NAME);
            return;
        }
    };
    match doc.dispatch_event(host, event) {
        Ok(listeners) => log::debug!("{} from {host} reached {listeners} listeners", N::NAME),
        Err(err) => log::warn!("failed to dispatch {} from {host}: {err}", N::NAME),
    }
}
