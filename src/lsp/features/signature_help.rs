//! Signature help for container methods, catalog functions and local functions

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{
    Documentation, ParameterInformation, ParameterLabel, Position, SignatureHelp,
    SignatureInformation,
};
use tracing::debug;

use super::completion::find_method;
use crate::catalog::Catalog;
use crate::index::DocumentIndex;
use crate::parsers::position_utils::text_before;

/// `identifier.method(argsSoFar` at the end of the text before the cursor.
static METHOD_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_]\w*)\.([A-Za-z_]\w*)\(([^()]*)$").expect("valid method call pattern")
});

/// `identifier(argsSoFar` at the end of the text before the cursor.
static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_]\w*)\(([^()]*)$").expect("valid call pattern")
});

/// Index of the parameter being filled: one per comma, clamped to the last
/// parameter, and zero for parameterless callees.
pub fn active_parameter(args_so_far: &str, param_count: usize) -> u32 {
    let commas = args_so_far.matches(',').count();
    commas.min(param_count.saturating_sub(1)) as u32
}

/// Answers a signature-help query; `None` when no call shape resolves.
pub fn signature_help(
    catalog: &Catalog,
    index: &DocumentIndex,
    text: &str,
    position: Position,
) -> Option<SignatureHelp> {
    let before = text_before(text, position);

    if let Some(caps) = METHOD_CALL.captures(before) {
        let target = &caps[1];
        let core_type = index.type_of(target);
        if let Some(method) = find_method(core_type, &caps[2]) {
            debug!("Signature help for {}.{} ({})", target, method.name, core_type);
            let params: Vec<String> = method.params.iter().map(|p| p.to_string()).collect();
            return Some(build_signature(
                method.label.to_string(),
                &params,
                method.doc.map(str::to_string),
                active_parameter(&caps[3], params.len()),
            ));
        }
    }

    let caps = CALL.captures(before)?;
    let callee = &caps[1];
    let args_so_far = &caps[2];

    if let Some(function) = catalog.function(callee) {
        debug!("Signature help for catalog function {}", callee);
        return Some(build_signature(
            function.label.clone(),
            &function.params,
            function.doc.clone(),
            active_parameter(args_so_far, function.params.len()),
        ));
    }

    if let Some(function) = index.function(callee) {
        debug!("Signature help for local function {}", callee);
        return Some(build_signature(
            function.label.clone(),
            &function.params,
            None,
            active_parameter(args_so_far, function.params.len()),
        ));
    }

    None
}

fn build_signature(
    label: String,
    params: &[String],
    doc: Option<String>,
    active: u32,
) -> SignatureHelp {
    let parameters = params
        .iter()
        .map(|p| ParameterInformation {
            label: ParameterLabel::Simple(p.clone()),
            documentation: None,
        })
        .collect();

    SignatureHelp {
        signatures: vec![SignatureInformation {
            label,
            documentation: doc.map(Documentation::String),
            parameters: Some(parameters),
            active_parameter: Some(active),
        }],
        active_signature: Some(0),
        active_parameter: Some(active),
    }
}
