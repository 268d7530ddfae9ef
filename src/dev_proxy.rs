//! Development proxy table
//!
//! Maps RPC service path prefixes to the backend origin so a local dev server can
//! forward them without cross-origin requests. Forwarding itself is left to the dev
//! server; this module only declares and matches the rules.

use serde::Serialize;

use crate::rpc::{EVENT_SERVICE_PATH, TODO_SERVICE_PATH};

/// Origin the dev backend listens on
pub const DEV_UPSTREAM: &str = "http://localhost:8080";

/// One forwarding rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProxyRule {
    pub prefix: &'static str,
    pub upstream: &'static str,
}

/// Ordered set of forwarding rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProxyTable {
    rules: Vec<ProxyRule>,
}

impl ProxyTable {
    /// Table used by the local dev server
    pub fn dev() -> Self {
        Self {
            rules: vec![
                ProxyRule {
                    prefix: TODO_SERVICE_PATH,
                    upstream: DEV_UPSTREAM,
                },
                ProxyRule {
                    prefix: EVENT_SERVICE_PATH,
                    upstream: DEV_UPSTREAM,
                },
            ],
        }
    }

    pub fn rules(&self) -> &[ProxyRule] {
        &self.rules
    }

    /// First rule whose prefix starts `path`
    pub fn route(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| path.starts_with(rule.prefix))
    }

    pub fn upstream_for(&self, path: &str) -> Option<&'static str> {
        self.route(path).map(|rule| rule.upstream)
    }
}

impl Default for ProxyTable {
    fn default() -> Self {
        Self::dev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_todo_service() {
        let table = ProxyTable::dev();
        assert_eq!(
            table.upstream_for("/todo.v1.TodoService/ListTodos"),
            Some("http://localhost:8080")
        );
        assert_eq!(table.upstream_for("/todo.v1.TodoService"), Some(DEV_UPSTREAM));
    }

    #[test]
    fn test_routes_event_service() {
        let table = ProxyTable::dev();
        let rule = table.route("/event.v1.EventService/RegisterForEvent").unwrap();
        assert_eq!(rule.prefix, "/event.v1.EventService");
        assert_eq!(rule.upstream, "http://localhost:8080");
    }

    #[test]
    fn test_other_paths_not_routed() {
        let table = ProxyTable::dev();
        for path in [
            "/",
            "/health",
            "/index.html",
            "/todo.v1",
            "/todo.v2.TodoService/ListTodos",
            "/api/todo.v1.TodoService/ListTodos",
            "todo.v1.TodoService/ListTodos",
            "/TODO.V1.TODOSERVICE/ListTodos",
        ] {
            assert_eq!(table.route(path), None, "{} should not be proxied", path);
        }
    }

    #[test]
    fn test_rule_order_preserved() {
        let prefixes: Vec<_> = ProxyTable::dev().rules().iter().map(|r| r.prefix).collect();
        assert_eq!(prefixes, vec!["/todo.v1.TodoService", "/event.v1.EventService"]);
    }

    #[test]
    fn test_serializes_as_rule_list() {
        let json = serde_json::to_value(ProxyTable::dev()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "prefix": "/todo.v1.TodoService", "upstream": "http://localhost:8080" },
                { "prefix": "/event.v1.EventService", "upstream": "http://localhost:8080" },
            ])
        );
    }
}
