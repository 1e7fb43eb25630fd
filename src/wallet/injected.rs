//! Browser wallet injected at `window.ethereum`.

use super::provider::{EventListener, ListenerId, ProviderEvent, WalletProvider};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

const ACCOUNTS_CHANGED: &str = "accountsChanged";
const CHAIN_CHANGED: &str = "chainChanged";

type JsHandler = Closure<dyn FnMut(JsValue)>;

/// EIP-1193 provider backed by the page's injected `window.ethereum`.
pub struct InjectedProvider {
    ethereum: JsValue,
    handlers: RefCell<HashMap<ListenerId, (JsHandler, JsHandler)>>,
    next_id: Cell<u64>,
}

impl InjectedProvider {
    /// `None` when the page has no injected wallet.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self {
            ethereum,
            handlers: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        })
    }

    fn method(&self, name: &str) -> Result<js_sys::Function, ProviderError> {
        js_sys::Reflect::get(&self.ethereum, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| ProviderError::internal(format!("provider has no {} function", name)))
    }

    fn subscribe(&self, function: &str, event: &str, handler: &JsHandler) {
        match self.method(function) {
            Ok(f) => {
                if let Err(e) = f.call2(
                    &self.ethereum,
                    &JsValue::from_str(event),
                    handler.as_ref().unchecked_ref(),
                ) {
                    tracing::warn!("{}({}) failed: {:?}", function, event, e);
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let args = serde_json::json!({ "method": method, "params": params });
        let args = js_sys::JSON::parse(&args.to_string())
            .map_err(|e| ProviderError::internal(format!("invalid request: {:?}", e)))?;

        let promise = self
            .method("request")?
            .call1(&self.ethereum, &args)
            .map_err(provider_error)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| ProviderError::internal("request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(provider_error)?;
        from_js(&result)
    }

    fn add_listener(&self, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let listener: Rc<EventListener> = Rc::new(listener);
        let on_accounts = {
            let listener = listener.clone();
            Closure::wrap(Box::new(move |value: JsValue| {
                let accounts = from_js(&value)
                    .ok()
                    .and_then(|v| serde_json::from_value::<Vec<String>>(v).ok())
                    .unwrap_or_default();
                listener(&ProviderEvent::AccountsChanged(accounts));
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_chain = Closure::wrap(Box::new(move |value: JsValue| {
            if let Some(chain_id) = value.as_string() {
                listener(&ProviderEvent::ChainChanged(chain_id));
            }
        }) as Box<dyn FnMut(JsValue)>);

        self.subscribe("on", ACCOUNTS_CHANGED, &on_accounts);
        self.subscribe("on", CHAIN_CHANGED, &on_chain);
        self.handlers.borrow_mut().insert(id, (on_accounts, on_chain));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let removed = self.handlers.borrow_mut().remove(&id);
        if let Some((on_accounts, on_chain)) = removed {
            self.subscribe("removeListener", ACCOUNTS_CHANGED, &on_accounts);
            self.subscribe("removeListener", CHAIN_CHANGED, &on_chain);
        }
    }
}

fn from_js(value: &JsValue) -> Result<Value, ProviderError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text = js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| ProviderError::internal("unserializable provider result"))?;
    serde_json::from_str(&text).map_err(|e| ProviderError::internal(e.to_string()))
}

/// `{code, message}` from a rejected provider promise.
fn provider_error(err: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64)
        .unwrap_or(ProviderError::INTERNAL);
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_default();
    ProviderError::new(code, message)
}
