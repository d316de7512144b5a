use std::fmt;

use serde::Serialize;

use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::request_body::RequestBody;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Methods in the order operations are visited within one path item.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// Capitalized form used in derived file names (`Get`, `Post`, ...).
    pub fn title(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Delete => "Delete",
            HttpMethod::Patch => "Patch",
            HttpMethod::Options => "Options",
            HttpMethod::Head => "Head",
        }
    }

    /// Whether a request body is generated for this method.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP method on one path, with references already resolved.
#[derive(Debug, Clone)]
pub struct ApiOperation {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Path-level parameters first, then operation-level ones.
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

impl ApiOperation {
    /// Split the declared parameters by location. Cookie and unknown
    /// locations are dropped.
    pub fn parameter_buckets(&self) -> ParameterBuckets {
        let mut buckets = ParameterBuckets::default();
        for param in &self.parameters {
            match param.location {
                ParameterLocation::Path => buckets.path.push(param.name.clone()),
                ParameterLocation::Query => buckets.query.push(QueryParameter {
                    name: param.name.clone(),
                    required: param.required,
                }),
                ParameterLocation::Header => buckets.header.push(param.name.clone()),
                ParameterLocation::Cookie | ParameterLocation::Other => {
                    log::warn!(
                        "{} {}: skipping {:?} parameter `{}`",
                        self.method,
                        self.path,
                        param.location,
                        param.name
                    );
                }
            }
        }
        buckets
    }
}

/// A query parameter as it appears in a request file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    pub name: String,
    pub required: bool,
}

/// Parameters of one operation partitioned by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBuckets {
    pub path: Vec<String>,
    pub query: Vec<QueryParameter>,
    pub header: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, location: ParameterLocation, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            required,
        }
    }

    #[test]
    fn test_parameter_buckets() {
        let op = ApiOperation {
            method: HttpMethod::Get,
            path: "/users/{id}".to_string(),
            operation_id: None,
            summary: None,
            tags: vec![],
            parameters: vec![
                param("id", ParameterLocation::Path, true),
                param("limit", ParameterLocation::Query, false),
                param("X-Trace", ParameterLocation::Header, false),
                param("session", ParameterLocation::Cookie, false),
                param("payload", ParameterLocation::Other, true),
            ],
            request_body: None,
        };
        let buckets = op.parameter_buckets();
        assert_eq!(buckets.path, vec!["id"]);
        assert_eq!(
            buckets.query,
            vec![QueryParameter {
                name: "limit".to_string(),
                required: false
            }]
        );
        assert_eq!(buckets.header, vec!["X-Trace"]);
    }

    #[test]
    fn test_sends_body() {
        assert!(HttpMethod::Post.sends_body());
        assert!(HttpMethod::Put.sends_body());
        assert!(HttpMethod::Patch.sends_body());
        assert!(!HttpMethod::Get.sends_body());
        assert!(!HttpMethod::Delete.sends_body());
    }
}
