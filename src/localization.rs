use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, LazyLock};
use unic_langid::LanguageIdentifier;

use crate::language::Language;

/// Localization manager for the Sights Bot
pub struct LocalizationManager {
    bundles: HashMap<Language, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with both supported languages loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for lang in [Language::En, Language::Ru] {
            let locale: LanguageIdentifier = lang.code().parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(lang, Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Directional isolate marks garble Telegram messages
        bundle.set_use_isolating(false);

        let resource_path = format!("./locales/{}/main.ftl", locale);
        let content = fs::read_to_string(&resource_path)
            .map_err(|e| anyhow!("failed to read {resource_path}: {e}"))?;
        let resource = FluentResource::try_new(content)
            .map_err(|_| anyhow!("failed to parse {resource_path}"))?;
        bundle
            .add_resource(resource)
            .map_err(|_| anyhow!("duplicate messages in {resource_path}"))?;

        Ok(bundle)
    }

    /// Get a localized message in the given language, falling back to
    /// English for keys missing from the Russian bundle.
    pub fn get_message_in_language(
        &self,
        key: &str,
        lang: Language,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = &self.bundles[&lang];

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None if lang != Language::En => {
                return self.get_message_in_language(key, Language::En, args)
            }
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();

        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));

            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut vec![]);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut vec![]);
        }

        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, lang: Language, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, lang, Some(&args_map))
    }
}

/// Global localization instance, loaded on first use
static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> = LazyLock::new(|| {
    LocalizationManager::new().expect("failed to load ./locales message resources")
});

/// Convenience function to get a localized message
pub fn t_lang(key: &str, lang: Language) -> String {
    LOCALIZATION_MANAGER.get_message_in_language(key, lang, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], lang: Language) -> String {
    LOCALIZATION_MANAGER.get_message_with_args(key, lang, args)
}
