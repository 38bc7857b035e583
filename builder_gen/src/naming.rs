/* Naming helpers for generated members */

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/* `("with", "size")` -> `withSize`, `("", "size")` -> `size` */
pub fn camel_case(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}", prefix, capitalize(name))
    }
}

/// English singular of a plural identifier, used for element-wise collection methods.
/// Only the last word of a camel-cased name is affected.
pub fn singular(name: &str) -> String {
    const ES_SUFFIXES: &[&str] = &["sses", "shes", "ches", "xes", "zes"];

    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if ES_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return name[..name.len() - 2].to_string();
    }
    if name.ends_with("ss") || name.ends_with("us") {
        return name.to_string();
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_with_prefix() {
        assert_eq!(camel_case("", "crustType"), "crustType");
        assert_eq!(camel_case("with", "crustType"), "withCrustType");
        assert_eq!(camel_case("add", "toppings"), "addToppings");
    }

    #[test]
    fn changes_case_of_first_letter_only() {
        assert_eq!(capitalize("size"), "Size");
        assert_eq!(decapitalize("Pizza"), "pizza");
        assert_eq!(decapitalize("HTTPServer"), "hTTPServer");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn singularizes_common_plurals() {
        assert_eq!(singular("toppings"), "topping");
        assert_eq!(singular("addToppings"), "addTopping");
        assert_eq!(singular("entries"), "entry");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("matches"), "match");
        assert_eq!(singular("classes"), "class");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("address"), "address");
        assert_eq!(singular("s"), "s");
        assert_eq!(singular("data"), "data");
    }
}
