use crate::error::TransformError;
use crate::ir::{ApiOperation, HttpMethod};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::ref_resolve::{resolve_parameter, resolve_request_body};
use crate::parse::spec::OpenApiDocument;

/// Flatten the document into operations, in declared path order and the
/// fixed method order of [`HttpMethod::ALL`]. Parameter and request body
/// references are resolved along the way.
pub fn collect_operations(document: &OpenApiDocument) -> Result<Vec<ApiOperation>, TransformError> {
    let mut operations = Vec::new();

    for (path, item) in &document.spec().paths {
        let path_params = resolve_parameters(document, &item.parameters)?;
        for method in HttpMethod::ALL {
            if let Some(op) = operation_for(item, method) {
                operations.push(build_operation(document, method, path, op, &path_params)?);
            }
        }
    }

    Ok(operations)
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
    }
}

fn build_operation(
    document: &OpenApiDocument,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    path_params: &[Parameter],
) -> Result<ApiOperation, TransformError> {
    let own_params = resolve_parameters(document, &op.parameters)?;

    // Operation-level parameters override path-level ones with the same
    // name and location.
    let mut parameters: Vec<Parameter> = path_params
        .iter()
        .filter(|p| {
            !own_params
                .iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    parameters.extend(own_params);

    let request_body = op
        .request_body
        .as_ref()
        .map(|body| resolve_request_body(document.raw(), body))
        .transpose()?;

    Ok(ApiOperation {
        method,
        path: path.to_string(),
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        tags: op.tags.clone(),
        parameters,
        request_body,
    })
}

fn resolve_parameters(
    document: &OpenApiDocument,
    params: &[ParameterOrRef],
) -> Result<Vec<Parameter>, TransformError> {
    params
        .iter()
        .map(|p| resolve_parameter(document.raw(), p).map_err(TransformError::from))
        .collect()
}
