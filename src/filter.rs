use crate::config::FilterConfig;
use crate::model::ComponentDoc;

/// Apply the configured exclusions to an assembled record.
///
/// Properties go first (global list, then inherited-only list, then the
/// component's override), followed by methods and styles in the same
/// global-then-override order. Filters only ever remove entries; when the
/// default style class is excluded the first remaining class becomes the default.
pub fn apply_filters(mut doc: ComponentDoc, filters: &FilterConfig) -> ComponentDoc {
    let overrides = filters.overrides.get(&doc.component_name);

    doc.props.retain(|p| !contains(&filters.exclude_props, &p.name));
    doc.props
        .retain(|p| !(p.inherited && contains(&filters.exclude_inherited_props, &p.name)));
    if let Some(o) = overrides {
        doc.props.retain(|p| !contains(&o.exclude_props, &p.name));
    }

    doc.methods.retain(|m| !contains(&filters.exclude_methods, &m.name));
    if let Some(o) = overrides {
        doc.methods.retain(|m| !contains(&o.exclude_methods, &m.name));
    }

    doc.styles
        .retain(|s| !contains(&filters.exclude_styles, &s.class_name));
    if let Some(o) = overrides {
        doc.styles.retain(|s| !contains(&o.exclude_styles, &s.class_name));
    }
    if !doc.styles.iter().any(|s| s.is_default) {
        if let Some(first) = doc.styles.first_mut() {
            first.is_default = true;
        }
    }

    doc
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|n| n == name)
}
