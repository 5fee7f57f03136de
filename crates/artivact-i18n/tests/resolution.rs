use artivact_i18n::{LocaleContext, TranslatableString, resolve};
use proptest::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
fn test_visitor_with_locale_and_editor_without_locale() {
	// Arrange
	let value = TranslatableString::new("Hello").with_translation("de", "Hallo");

	// Act
	let visitor = resolve(&value, Some("de"), false);
	let editor = resolve(&value, None, true);

	// Assert
	assert_eq!(visitor, "Hallo");
	assert_eq!(editor, "Hello");
}

#[rstest]
fn test_context_resolution_matches_free_function() {
	let value = TranslatableString::new("Hello").with_translation("fr", "Bonjour");
	let ctx = LocaleContext::new(Some("fr".into()), true);

	assert_eq!(ctx.resolve(&value), resolve(&value, Some("fr"), true));
}

fn translatable() -> impl Strategy<Value = TranslatableString> {
	(
		".{0,8}",
		proptest::option::of(".{0,8}"),
		proptest::collection::btree_map("[a-z]{2}", ".{0,8}", 0..4),
	)
		.prop_map(|(value, translated_value, translations): (String, Option<String>, BTreeMap<String, String>)| {
			TranslatableString {
				value,
				translated_value,
				translations,
			}
		})
}

proptest! {
	#[test]
	fn resolving_twice_yields_the_same_text(
		value in translatable(),
		locale in proptest::option::of("[a-z]{2}"),
		privileged in any::<bool>(),
	) {
		let before = value.clone();

		let first = resolve(&value, locale.as_deref(), privileged);
		let second = resolve(&value, locale.as_deref(), privileged);

		prop_assert_eq!(first, second);
		prop_assert_eq!(value, before);
	}

	#[test]
	fn non_empty_translation_for_active_locale_always_wins(
		value in translatable(),
		locale in "[a-z]{2}",
		text in ".{1,8}",
		privileged in any::<bool>(),
	) {
		let value = TranslatableString { translations: BTreeMap::from([(locale.clone(), text.clone())]), ..value };

		prop_assert_eq!(resolve(&value, Some(&locale), privileged), text);
	}
}
