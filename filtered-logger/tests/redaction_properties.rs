/// Property tests for field redaction over generated `key=value` lines
use filtered_logger::{filter_datum, FieldRedactor};
use proptest::prelude::*;

fn pair_list() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z_]{1,8}", "[A-Za-z0-9@. :/?=&-]{0,12}"), 0..8)
}

fn field_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_]{1,8}", 0..4)
}

fn redaction_token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["***", "********", "xxx", "$1", "\\0", "[REDACTED]"])
}

fn join(pairs: &[(String, String)], separator: &str, trailing: bool) -> String {
    let mut line = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(separator);
    if trailing && !pairs.is_empty() {
        line.push_str(separator);
    }
    line
}

proptest! {
    #[test]
    fn listed_values_replaced_unlisted_untouched(
        pairs in pair_list(),
        fields in field_list(),
        token in redaction_token(),
        trailing in any::<bool>(),
    ) {
        let message = join(&pairs, ";", trailing);
        let expected_pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(key, value)| {
                if fields.contains(key) {
                    (key.clone(), token.to_string())
                } else {
                    (key.clone(), value.clone())
                }
            })
            .collect();
        let expected = join(&expected_pairs, ";", trailing);

        prop_assert_eq!(filter_datum(&fields, token, &message, ";"), expected);
    }

    #[test]
    fn redaction_is_idempotent(
        pairs in pair_list(),
        fields in field_list(),
        token in redaction_token(),
        trailing in any::<bool>(),
    ) {
        let redactor = FieldRedactor::new(&fields, token, ";").unwrap();
        let once = redactor.redact(&join(&pairs, ";", trailing));
        prop_assert_eq!(redactor.redact(&once), once);
    }

    #[test]
    fn separator_choice_does_not_change_result(
        pairs in pair_list(),
        fields in field_list(),
        token in redaction_token(),
    ) {
        let semicolon = filter_datum(&fields, token, &join(&pairs, ";", true), ";");
        let pipes = filter_datum(&fields, token, &join(&pairs, "||", true), "||");
        prop_assert_eq!(semicolon.replace(';', "||"), pipes);
    }
}
