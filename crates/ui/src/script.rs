//! Script injected into every page before it loads.
//!
//! Installs `window.fcut.api`, one promise-returning function per bridge
//! method, and fires [`READY_EVENT`] once the document is parsed.

use fcut_domain::{BridgeMethod, PROTOCOL_VERSION};

/// DOM event dispatched on `window` when the API is usable.
pub const READY_EVENT: &str = "fcut:ready";

const TEMPLATE: &str = r#"(function () {
  if (window.fcut && window.fcut.api) { return; }
  var pending = new Map();
  var nextId = 1;
  function call(method, params) {
    return new Promise(function (resolve, reject) {
      var id = nextId++;
      pending.set(id, { resolve: resolve, reject: reject });
      window.ipc.postMessage(JSON.stringify({
        version: __VERSION__, id: id, method: method, params: params
      }));
    });
  }
  var api = {};
  __METHODS__.forEach(function (method) {
    api[method] = function () { return call(method, Array.prototype.slice.call(arguments)); };
  });
  api.logger_warn = api.logger_warning;
  window.fcut = {
    api: api,
    __resolve: function (response) {
      var entry = pending.get(response.id);
      if (!entry) { return; }
      pending.delete(response.id);
      if (response.status === "ok") {
        entry.resolve(response.result);
      } else {
        var error = new Error(response.error.message);
        error.code = response.error.code;
        entry.reject(error);
      }
    }
  };
  function ready() { window.dispatchEvent(new Event(__READY__)); }
  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", ready);
  } else {
    ready();
  }
})();
"#;

/// Builds the initialization script from the method catalogue.
#[must_use]
pub fn init_script() -> String {
    let methods = serde_json::Value::from(BridgeMethod::names()).to_string();
    let ready = serde_json::Value::from(READY_EVENT).to_string();
    TEMPLATE
        .replace("__VERSION__", &PROTOCOL_VERSION.to_string())
        .replace("__METHODS__", &methods)
        .replace("__READY__", &ready)
}
