//! Option derivation
//!
//! Turns a signature into the option set used for binding and help. The
//! result only depends on the signature and the settings, and the same
//! inputs always yield the same short forms and spellings.

use crate::config::{HyphenMode, Settings};
use crate::error::{RegistrationError, RegistrationResult};
use crate::options::{OptionKind, OptionSet, OptionSpec, ValueType};
use crate::signature::{Parameter, Signature, Value};
use std::collections::HashMap;
use tracing::debug;

/// Short form reserved for help
pub const HELP_SHORT: char = 'h';

/// Long form reserved for help
pub const HELP_LONG: &str = "help";

/// Derive the option set for a signature
pub fn derive_options(signature: &Signature, settings: &Settings) -> RegistrationResult<OptionSet> {
    let mut options: Vec<OptionSpec> = signature
        .effective_params(settings.ignore_self)
        .map(|param| derive_option(param, &settings.modes))
        .collect();

    assign_short_forms(&mut options);
    let by_long = index_long_forms(&options)?;
    let by_short = options
        .iter()
        .enumerate()
        .filter_map(|(index, option)| option.short.map(|c| (c, index)))
        .collect();

    debug!(
        options = options.len(),
        flags = by_long.len(),
        "derived option set"
    );

    Ok(OptionSet::from_parts(options, by_long, by_short))
}

/// Derive a single option from its parameter; short forms are assigned later
fn derive_option(param: &Parameter, modes: &[HyphenMode]) -> OptionSpec {
    let (kind, value_type) = match &param.default {
        Some(Value::Bool(_)) => (OptionKind::Boolean, ValueType::Bool),
        Some(Value::List(_)) => (OptionKind::List, ValueType::String),
        _ => (OptionKind::Value, param.declared_type()),
    };

    let flag = match &param.default {
        Some(Value::Bool(true)) => negated_name(&param.name),
        _ => param.name.clone(),
    };

    OptionSpec {
        name: param.name.clone(),
        long_forms: long_spellings(&flag, modes),
        flag,
        short: None,
        kind,
        value_type,
        required: param.default.is_none() && kind != OptionKind::Boolean,
        default: param.default.clone(),
        positional: param.position.is_some() && kind == OptionKind::Value,
    }
}

/// Name of the flag that turns a true-defaulted switch off
fn negated_name(name: &str) -> String {
    if name.contains('-') && !name.contains('_') {
        format!("no-{}", name)
    } else {
        format!("no_{}", name)
    }
}

/// Accepted spellings of a flag under the configured modes
fn long_spellings(flag: &str, modes: &[HyphenMode]) -> Vec<String> {
    if !flag.contains('_') {
        return vec![flag.to_string()];
    }

    let mut spellings: Vec<String> = Vec::with_capacity(modes.len());
    for mode in modes {
        let spelling = mode.apply(flag);
        if !spellings.contains(&spelling) {
            spellings.push(spelling);
        }
    }
    if spellings.is_empty() {
        spellings.push(flag.to_string());
    }
    spellings
}

/// Give each option a short form by the first letter of its flag
///
/// The first claimant of a letter gets it in lowercase, the second gets
/// it in uppercase and any later claimant gets nothing. Help holds the
/// lowercase `h`.
fn assign_short_forms(options: &mut [OptionSpec]) {
    let mut claims: HashMap<char, usize> = HashMap::from([(HELP_SHORT, 1)]);

    for option in options.iter_mut() {
        let Some(first) = option.flag.chars().next() else {
            continue;
        };
        let letter = first.to_ascii_lowercase();
        let count = claims.entry(letter).or_insert(0);

        option.short = match *count {
            0 => Some(letter),
            1 => Some(letter.to_ascii_uppercase()),
            _ => None,
        };
        *count += 1;
    }
}

/// Map every long spelling to its option, rejecting ambiguous spellings
fn index_long_forms(options: &[OptionSpec]) -> RegistrationResult<HashMap<String, usize>> {
    let mut by_long: HashMap<String, usize> = HashMap::new();

    for (index, option) in options.iter().enumerate() {
        for spelling in &option.long_forms {
            if spelling == HELP_LONG {
                return Err(RegistrationError::OptionConflict {
                    flag: spelling.clone(),
                    first: HELP_LONG.to_string(),
                    second: option.name.clone(),
                });
            }

            if let Some(&existing) = by_long.get(spelling) {
                if existing != index {
                    return Err(RegistrationError::OptionConflict {
                        flag: spelling.clone(),
                        first: options[existing].name.clone(),
                        second: option.name.clone(),
                    });
                }
            }
            by_long.insert(spelling.clone(), index);
        }
    }

    Ok(by_long)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(builder: crate::signature::SignatureBuilder) -> RegistrationResult<OptionSet> {
        derive_options(&builder.build().unwrap(), &Settings::default())
    }

    fn shorts(set: &OptionSet) -> Vec<Option<char>> {
        set.iter().map(|o| o.short).collect()
    }

    #[test]
    fn test_short_forms_first_second_third() {
        let set = derive(
            Signature::builder()
                .required("a1")
                .required("a2")
                .required("apple"),
        )
        .unwrap();
        assert_eq!(shorts(&set), vec![Some('a'), Some('A'), None]);
    }

    #[test]
    fn test_short_forms_are_case_insensitive() {
        let set = derive(Signature::builder().required("Key").required("kind")).unwrap();
        assert_eq!(shorts(&set), vec![Some('k'), Some('K')]);
    }

    #[test]
    fn test_help_holds_lowercase_h() {
        let set = derive(
            Signature::builder()
                .required("host")
                .required("hash")
                .required("hue"),
        )
        .unwrap();
        assert_eq!(shorts(&set), vec![Some('H'), None, None]);
    }

    #[test]
    fn test_greet_signature() {
        let set = derive(
            Signature::builder()
                .required("name")
                .optional("title", "Mr.")
                .optional("times", 1)
                .optional("comma", false)
                .optional("caps_lock", false),
        )
        .unwrap();

        assert_eq!(
            shorts(&set),
            vec![Some('n'), Some('t'), Some('T'), Some('c'), Some('C')]
        );
        let times = set.get("times").unwrap();
        assert_eq!(times.kind, OptionKind::Value);
        assert_eq!(times.value_type, ValueType::Int);
        assert!(!times.required);
        assert!(set.get("name").unwrap().required);
        assert_eq!(set.get("comma").unwrap().kind, OptionKind::Boolean);
    }

    #[test]
    fn test_true_boolean_is_negated() {
        let set = derive(
            Signature::builder()
                .required("name")
                .optional("color", true),
        )
        .unwrap();

        let color = set.get("color").unwrap();
        assert_eq!(color.flag, "no_color");
        assert_eq!(color.long_forms, vec!["no-color", "no_color"]);
        // short letter comes from the negated name
        assert_eq!(color.short, Some('N'));
        assert_eq!(set.index_of_long("no-color"), Some(1));
        assert_eq!(set.index_of_long("color"), None);
    }

    #[test]
    fn test_hyphen_aliases() {
        let set = derive(Signature::builder().required("host_name")).unwrap();
        let option = set.get("host_name").unwrap();
        assert_eq!(option.display_long(), "host-name");
        assert_eq!(option.hyphen_aliases(), ["host_name".to_string()]);
        assert_eq!(set.index_of_long("host-name"), Some(0));
        assert_eq!(set.index_of_long("host_name"), Some(0));
    }

    #[test]
    fn test_underscore_only_mode() {
        let settings = Settings {
            modes: vec![HyphenMode::Underscore],
            ..Settings::default()
        };
        let sig = Signature::builder().required("host_name").build().unwrap();
        let set = derive_options(&sig, &settings).unwrap();
        assert_eq!(set.get("host_name").unwrap().long_forms, vec!["host_name"]);
        assert_eq!(set.index_of_long("host-name"), None);
    }

    #[test]
    fn test_delete_mode() {
        let settings = Settings {
            modes: vec![HyphenMode::Delete, HyphenMode::Dash],
            ..Settings::default()
        };
        let sig = Signature::builder().required("caps_lock").build().unwrap();
        let set = derive_options(&sig, &settings).unwrap();
        assert_eq!(
            set.get("caps_lock").unwrap().long_forms,
            vec!["capslock", "caps-lock"]
        );
    }

    #[test]
    fn test_hyphen_underscore_conflict() {
        let result = derive(
            Signature::builder()
                .optional("caps_lock", false)
                .optional("caps-lock", false),
        );
        match result {
            Err(RegistrationError::OptionConflict { flag, first, second }) => {
                assert_eq!(flag, "caps-lock");
                assert_eq!(first, "caps_lock");
                assert_eq!(second, "caps-lock");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_mode_conflict() {
        let settings = Settings {
            modes: vec![HyphenMode::Delete],
            ..Settings::default()
        };
        let sig = Signature::builder()
            .required("ab_c")
            .required("abc")
            .build()
            .unwrap();
        match derive_options(&sig, &settings) {
            Err(RegistrationError::OptionConflict { flag, first, second }) => {
                assert_eq!(flag, "abc");
                assert_eq!(first, "ab_c");
                assert_eq!(second, "abc");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_mode_spelling_of_help() {
        let settings = Settings {
            modes: vec![HyphenMode::Delete],
            ..Settings::default()
        };
        let sig = Signature::builder().optional("he_lp", false).build().unwrap();
        match derive_options(&sig, &settings) {
            Err(RegistrationError::OptionConflict { flag, first, second }) => {
                assert_eq!(flag, "help");
                assert_eq!(first, "help");
                assert_eq!(second, "he_lp");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_no_conflict_without_hyphenation() {
        let settings = Settings {
            modes: vec![HyphenMode::Underscore],
            ..Settings::default()
        };
        let sig = Signature::builder()
            .optional("caps_lock", false)
            .optional("caps-lock", false)
            .build()
            .unwrap();
        assert!(derive_options(&sig, &settings).is_ok());
    }

    #[test]
    fn test_negated_name_conflict() {
        let result = derive(
            Signature::builder()
                .optional("color", true)
                .optional("no_color", "x"),
        );
        assert!(matches!(
            result,
            Err(RegistrationError::OptionConflict { .. })
        ));
    }

    #[test]
    fn test_help_name_is_reserved() {
        let result = derive(Signature::builder().optional("help", false));
        assert!(matches!(
            result,
            Err(RegistrationError::OptionConflict { .. })
        ));
    }

    #[test]
    fn test_list_option() {
        let set = derive(
            Signature::builder()
                .optional("tags", Vec::<String>::new())
                .optional("paths", vec!["src"]),
        )
        .unwrap();

        let tags = set.get("tags").unwrap();
        assert_eq!(tags.kind, OptionKind::List);
        assert_eq!(tags.value_type, ValueType::String);
        assert!(!tags.positional);
        assert_eq!(tags.initial_value(), Some(Value::List(vec![])));
        assert_eq!(
            set.get("paths").unwrap().initial_value(),
            Some(Value::from(vec!["src"]))
        );
    }

    #[test]
    fn test_none_default_is_optional_string() {
        let set = derive(Signature::builder().optional("path", None::<&str>)).unwrap();
        let path = set.get("path").unwrap();
        assert_eq!(path.value_type, ValueType::String);
        assert!(!path.required);
        assert_eq!(path.initial_value(), Some(Value::None));
    }

    #[test]
    fn test_ignore_self() {
        let sig = Signature::builder().receiver().required("key").build().unwrap();

        let set = derive_options(&sig, &Settings::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.options()[0].short, Some('k'));

        let keep_self = Settings {
            ignore_self: false,
            ..Settings::default()
        };
        let set = derive_options(&sig, &keep_self).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("self").unwrap().required);
    }

    #[test]
    fn test_keyword_only_is_not_positional() {
        let set = derive(
            Signature::builder()
                .required("key")
                .keyword_required("token"),
        )
        .unwrap();
        assert!(set.get("key").unwrap().positional);
        assert!(!set.get("token").unwrap().positional);
        assert!(set.get("token").unwrap().required);
    }
}
