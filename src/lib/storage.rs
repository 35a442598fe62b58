//! Client-side persisted state. Logout wipes everything the browser keeps for
//! this origin (key/value storage and IndexedDB) before handing control to the
//! identity provider, so no cached data survives a role switch.

use super::errors::AppError;

/// Browser-side persistence that can be counted and wiped.
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    /// Number of key/value entries currently persisted.
    fn entry_count(&self) -> usize;

    /// Removes every persisted entry and database.
    async fn clear_all(&self) -> Result<(), AppError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::LocalStore;
    use crate::app_lib::errors::{AppError, js_error_message};
    use js_sys::{Array, Function, Promise, Reflect};
    use tracing::{debug, warn};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{IdbOpenDbRequest, Storage};

    /// `localStorage`, `sessionStorage` and IndexedDB of the current origin.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserStore;

    impl BrowserStore {
        fn storages() -> Vec<Storage> {
            let Some(window) = web_sys::window() else {
                return Vec::new();
            };
            [window.local_storage(), window.session_storage()]
                .into_iter()
                .filter_map(|storage| storage.ok().flatten())
                .collect()
        }
    }

    impl LocalStore for BrowserStore {
        fn entry_count(&self) -> usize {
            Self::storages()
                .iter()
                .map(|storage| storage.length().unwrap_or(0) as usize)
                .sum()
        }

        async fn clear_all(&self) -> Result<(), AppError> {
            delete_indexed_databases().await?;
            for storage in Self::storages() {
                storage
                    .clear()
                    .map_err(|err| AppError::Storage(js_error_message(&err)))?;
            }
            Ok(())
        }
    }

    async fn delete_indexed_databases() -> Result<(), AppError> {
        let Some(window) = web_sys::window() else {
            return Ok(());
        };
        let Some(factory) = window
            .indexed_db()
            .map_err(|err| AppError::Storage(js_error_message(&err)))?
        else {
            return Ok(());
        };

        let databases = Reflect::get(&factory, &JsValue::from_str("databases"))
            .map_err(|err| AppError::Storage(js_error_message(&err)))?;
        let Some(databases) = databases.dyn_ref::<Function>() else {
            warn!("IndexedDB enumeration is not supported by this browser");
            return Ok(());
        };

        let promise: Promise = databases
            .call0(&factory)
            .and_then(|value| value.dyn_into::<Promise>())
            .map_err(|err| AppError::Storage(js_error_message(&err)))?;
        let list = JsFuture::from(promise)
            .await
            .map_err(|err| AppError::Storage(js_error_message(&err)))?;

        for entry in Array::from(&list).iter() {
            let name = Reflect::get(&entry, &JsValue::from_str("name"))
                .ok()
                .and_then(|value| value.as_string());
            if let Some(name) = name {
                let request = factory
                    .delete_database(&name)
                    .map_err(|err| AppError::Storage(js_error_message(&err)))?;
                settle(&request).await?;
                debug!(database = %name, "deleted IndexedDB database");
            }
        }
        Ok(())
    }

    /// Waits for a delete request to finish. A blocked delete completes once
    /// other tabs close their connections, so it counts as settled.
    async fn settle(request: &IdbOpenDbRequest) -> Result<(), AppError> {
        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            request.set_onsuccess(Some(&resolve));
            request.set_onblocked(Some(&resolve));
            request.set_onerror(Some(&reject));
        });
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| AppError::Storage(js_error_message(&err)))
    }
}
