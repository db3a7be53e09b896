//! Built-in descriptor catalog for the managed chat platform.
//!
//! One builder expression per field, grouped by category in export order.
//! The table is code rather than data files: the registry is immutable per
//! process, so edits land as deployments and a broken edit fails the boot
//! via the registry's invariant checks.
//!
//! Conventions worth knowing when editing:
//! - secret-bearing fields that the platform reads from *both* files carry
//!   `.bug_exception()`: the value ships in ENV, the YAML side only ever
//!   holds a `${KEY}` placeholder;
//! - `.config_path(...)` marks fields whose internal storage address differs
//!   from the external YAML nesting (the `baseURL` vs `url` family);
//! - `.legacy(...)` lists historical id spellings collapsed on export.

use serde_json::{json, Value};

use crate::types::{FieldCategory, FieldDescriptor, FieldType};

use FieldCategory::*;
use FieldType::Email as EmailT;
use FieldType::String as Str;
use FieldType::{Array, Boolean, Enum, Number, Object, Url};

fn f(id: &'static str, ty: FieldType, cat: FieldCategory) -> FieldDescriptor {
    FieldDescriptor::new(id, ty, cat)
}

/// TRUST_PROXY historically accepted booleans; the platform wants a hop
/// count. Coerce "true"/"false" and fall back to one hop.
fn trust_proxy_from_env(raw: &str) -> Value {
    match raw {
        "true" => json!(1),
        "false" => json!(0),
        other => other.parse::<i64>().map(Value::from).unwrap_or(json!(1)),
    }
}

/// File size limits show up as quoted numbers in hand-edited YAML.
fn size_limit_from_yaml(value: &Value) -> Value {
    match value {
        Value::String(s) => s.trim().parse::<i64>().map(Value::from).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

/// The complete built-in catalog, in catalog (and therefore export) order.
pub fn builtin_descriptors() -> Vec<FieldDescriptor> {
    vec![
        // --- app ---
        f("appTitle", Str, App).env("APP_TITLE").default_value(json!("LibreChat")),
        f("customFooter", Str, App).env("CUSTOM_FOOTER"),
        f("helpAndFaqUrl", Url, App).env("HELP_AND_FAQ_URL"),
        f("configVersion", Str, App).yaml("version").default_value(json!("1.2.8")),
        f("cache", Boolean, App).yaml("cache").default_value(json!(true)),

        // --- server ---
        f("host", Str, Server).env("HOST").default_value(json!("localhost")),
        f("port", Number, Server).env("PORT").default_value(json!(3080)).range(1, 65535),
        f("domainClient", Url, Server).env("DOMAIN_CLIENT").default_value(json!("http://localhost:3080")),
        f("domainServer", Url, Server).env("DOMAIN_SERVER").default_value(json!("http://localhost:3080")),
        f("noIndex", Boolean, Server).env("NO_INDEX").default_value(json!(true)),
        f("trustProxy", Number, Server).env("TRUST_PROXY").default_value(json!(1)).env_transform(trust_proxy_from_env),
        f("debugLogging", Boolean, Server).env("DEBUG_LOGGING").default_value(json!(false)),
        f("debugConsole", Boolean, Server).env("DEBUG_CONSOLE").default_value(json!(false)),
        f("consoleJson", Boolean, Server).env("CONSOLE_JSON").default_value(json!(false)),

        // --- security ---
        f("jwtSecret", Str, Security).env("JWT_SECRET").secret(),
        f("jwtRefreshSecret", Str, Security).env("JWT_REFRESH_SECRET").secret(),
        f("credsKey", Str, Security).env("CREDS_KEY").secret(),
        f("credsIV", Str, Security).env("CREDS_IV").secret(),
        f("sessionExpiry", Number, Security).env("SESSION_EXPIRY").default_value(json!(900_000)),
        f("refreshTokenExpiry", Number, Security).env("REFRESH_TOKEN_EXPIRY").default_value(json!(604_800_000)),

        // --- database ---
        f("mongoUri", Str, Database).env("MONGO_URI")
            .default_value(json!("mongodb://127.0.0.1:27017/LibreChat"))
            .legacy(&["mongodbUri"]),
        f("redisUri", Str, Database).env("REDIS_URI"),
        f("useRedis", Boolean, Database).env("USE_REDIS").default_value(json!(false)),

        // --- ai-providers ---
        f("openaiApiKey", Str, AiProviders).env("OPENAI_API_KEY").legacy(&["openAIApiKey"]),
        f("openaiModels", Array, AiProviders).env("OPENAI_MODELS"),
        f("openaiReverseProxy", Url, AiProviders).env("OPENAI_REVERSE_PROXY"),
        f("assistantsApiKey", Str, AiProviders).env("ASSISTANTS_API_KEY"),
        f("anthropicApiKey", Str, AiProviders).env("ANTHROPIC_API_KEY"),
        f("anthropicModels", Array, AiProviders).env("ANTHROPIC_MODELS"),
        f("googleApiKey", Str, AiProviders).env("GOOGLE_KEY").legacy(&["googleKey"]),
        f("googleModels", Array, AiProviders).env("GOOGLE_MODELS"),
        f("groqApiKey", Str, AiProviders).env("GROQ_API_KEY"),
        f("mistralApiKey", Str, AiProviders).env("MISTRAL_API_KEY"),
        f("openrouterKey", Str, AiProviders).env("OPENROUTER_KEY"),
        f("deepseekApiKey", Str, AiProviders).env("DEEPSEEK_API_KEY"),
        f("azureApiKey", Str, AiProviders).env("AZURE_API_KEY"),
        f("bedrockAwsAccessKeyId", Str, AiProviders).env("BEDROCK_AWS_ACCESS_KEY_ID"),
        f("bedrockAwsSecretAccessKey", Str, AiProviders).env("BEDROCK_AWS_SECRET_ACCESS_KEY"),
        f("bedrockAwsDefaultRegion", Str, AiProviders).env("BEDROCK_AWS_DEFAULT_REGION"),

        // --- oauth ---
        f("allowSocialLogin", Boolean, Oauth).env("ALLOW_SOCIAL_LOGIN").default_value(json!(false)),
        f("allowSocialRegistration", Boolean, Oauth).env("ALLOW_SOCIAL_REGISTRATION").default_value(json!(false)),
        f("googleClientId", Str, Oauth).env("GOOGLE_CLIENT_ID"),
        f("googleClientSecret", Str, Oauth).env("GOOGLE_CLIENT_SECRET"),
        f("googleCallbackUrl", Str, Oauth).env("GOOGLE_CALLBACK_URL").default_value(json!("/oauth/google/callback")),
        f("githubClientId", Str, Oauth).env("GITHUB_CLIENT_ID"),
        f("githubClientSecret", Str, Oauth).env("GITHUB_CLIENT_SECRET"),
        f("githubCallbackUrl", Str, Oauth).env("GITHUB_CALLBACK_URL").default_value(json!("/oauth/github/callback")),
        f("discordClientId", Str, Oauth).env("DISCORD_CLIENT_ID"),
        f("discordClientSecret", Str, Oauth).env("DISCORD_CLIENT_SECRET"),
        f("discordCallbackUrl", Str, Oauth).env("DISCORD_CALLBACK_URL").default_value(json!("/oauth/discord/callback")),
        f("facebookClientId", Str, Oauth).env("FACEBOOK_CLIENT_ID"),
        f("facebookClientSecret", Str, Oauth).env("FACEBOOK_CLIENT_SECRET"),
        f("openidIssuer", Url, Oauth).env("OPENID_ISSUER"),
        f("openidClientId", Str, Oauth).env("OPENID_CLIENT_ID"),
        f("openidClientSecret", Str, Oauth).env("OPENID_CLIENT_SECRET"),
        f("openidSessionSecret", Str, Oauth).env("OPENID_SESSION_SECRET"),

        // --- email ---
        f("emailService", Str, Email).env("EMAIL_SERVICE"),
        f("emailHost", Str, Email).env("EMAIL_HOST"),
        f("emailPort", Number, Email).env("EMAIL_PORT").default_value(json!(25)).range(1, 65535),
        f("emailUsername", EmailT, Email).env("EMAIL_USERNAME"),
        f("emailPassword", Str, Email).env("EMAIL_PASSWORD"),
        f("emailFrom", EmailT, Email).env("EMAIL_FROM").default_value(json!("noreply@librechat.ai")),
        f("emailFromName", Str, Email).env("EMAIL_FROM_NAME"),

        // --- file-storage ---
        f("cdnProvider", Enum, FileStorage).env("CDN_PROVIDER")
            .enum_of(&["local", "firebase", "s3", "azure_blob"])
            .default_value(json!("local")),
        f("firebaseApiKey", Str, FileStorage).env("FIREBASE_API_KEY"),
        f("firebaseAuthDomain", Str, FileStorage).env("FIREBASE_AUTH_DOMAIN"),
        f("firebaseProjectId", Str, FileStorage).env("FIREBASE_PROJECT_ID"),
        f("firebaseStorageBucket", Str, FileStorage).env("FIREBASE_STORAGE_BUCKET"),
        f("awsBucketName", Str, FileStorage).env("AWS_BUCKET_NAME"),
        f("awsAccessKeyId", Str, FileStorage).env("AWS_ACCESS_KEY_ID"),
        f("awsSecretAccessKey", Str, FileStorage).env("AWS_SECRET_ACCESS_KEY"),
        f("awsRegion", Str, FileStorage).env("AWS_REGION"),

        // --- search ---
        f("searchEnabled", Boolean, Search).env("SEARCH").default_value(json!(true)),
        f("meiliHost", Url, Search).env("MEILI_HOST").default_value(json!("http://0.0.0.0:7700")),
        f("meiliMasterKey", Str, Search).env("MEILI_MASTER_KEY").legacy(&["meilisearchMasterKey"]),
        f("meiliNoAnalytics", Boolean, Search).env("MEILI_NO_ANALYTICS").default_value(json!(true)),

        // --- rate-limit (ENV side) ---
        f("limitConcurrentMessages", Boolean, RateLimit).env("LIMIT_CONCURRENT_MESSAGES").default_value(json!(true)),
        f("concurrentMessageMax", Number, RateLimit).env("CONCURRENT_MESSAGE_MAX").default_value(json!(2)),
        f("limitMessageIp", Boolean, RateLimit).env("LIMIT_MESSAGE_IP").default_value(json!(true)),
        f("messageIpMax", Number, RateLimit).env("MESSAGE_IP_MAX").default_value(json!(40)),
        f("messageIpWindow", Number, RateLimit).env("MESSAGE_IP_WINDOW").default_value(json!(1)),
        f("limitMessageUser", Boolean, RateLimit).env("LIMIT_MESSAGE_USER").default_value(json!(false)),
        f("messageUserMax", Number, RateLimit).env("MESSAGE_USER_MAX").default_value(json!(40)),
        f("messageUserWindow", Number, RateLimit).env("MESSAGE_USER_WINDOW").default_value(json!(1)),
        f("banViolations", Boolean, RateLimit).env("BAN_VIOLATIONS").default_value(json!(true)),
        f("banDuration", Number, RateLimit).env("BAN_DURATION").default_value(json!(7_200_000)),
        f("banInterval", Number, RateLimit).env("BAN_INTERVAL").default_value(json!(20)),

        // --- interface (YAML) ---
        f("customWelcome", Str, Interface).yaml("interface.customWelcome").legacy(&["interfaceCustomWelcome"]),
        f("endpointsMenu", Boolean, Interface).yaml("interface.endpointsMenu").default_value(json!(true)),
        f("modelSelect", Boolean, Interface).yaml("interface.modelSelect").default_value(json!(true)),
        f("parameters", Boolean, Interface).yaml("interface.parameters").default_value(json!(true)),
        f("sidePanel", Boolean, Interface).yaml("interface.sidePanel").default_value(json!(true)),
        f("presets", Boolean, Interface).yaml("interface.presets").default_value(json!(true)),
        f("prompts", Boolean, Interface).yaml("interface.prompts").default_value(json!(true)),
        f("bookmarks", Boolean, Interface).yaml("interface.bookmarks").default_value(json!(true)),
        f("multiConvo", Boolean, Interface).yaml("interface.multiConvo").default_value(json!(true)),
        f("agentsUi", Boolean, Interface).yaml("interface.agents").default_value(json!(true)),
        f("privacyPolicyUrl", Url, Interface)
            .yaml("interface.privacyPolicy.externalUrl")
            .config_path("privacyPolicyUrl"),
        f("privacyPolicyOpenNewTab", Boolean, Interface)
            .yaml("interface.privacyPolicy.openNewTab")
            .config_path("privacyPolicyOpenNewTab")
            .default_value(json!(true)),
        f("tosUrl", Url, Interface)
            .yaml("interface.termsOfService.externalUrl")
            .config_path("tosUrl"),
        f("tosOpenNewTab", Boolean, Interface)
            .yaml("interface.termsOfService.openNewTab")
            .config_path("tosOpenNewTab")
            .default_value(json!(true)),

        // --- registration ---
        f("allowRegistration", Boolean, Registration).env("ALLOW_REGISTRATION").default_value(json!(true)),
        f("allowEmailLogin", Boolean, Registration).env("ALLOW_EMAIL_LOGIN").default_value(json!(true)),
        f("allowUnverifiedEmailLogin", Boolean, Registration).env("ALLOW_UNVERIFIED_EMAIL_LOGIN").default_value(json!(true)),
        f("allowPasswordReset", Boolean, Registration).env("ALLOW_PASSWORD_RESET").default_value(json!(false)),
        f("minPasswordLength", Number, Registration).env("MIN_PASSWORD_LENGTH").default_value(json!(8)).range(8, 128),
        f("registrationSocialLogins", Array, Registration).yaml("registration.socialLogins"),
        f("registrationAllowedDomains", Array, Registration).yaml("registration.allowedDomains"),

        // --- moderation ---
        f("openaiModeration", Boolean, Moderation).env("OPENAI_MODERATION").default_value(json!(false)),
        f("openaiModerationApiKey", Str, Moderation).env("OPENAI_MODERATION_API_KEY"),

        // --- web-search ---
        // The platform reads search credentials from ENV even though the
        // section is configured in YAML; these are the documented
        // bug-exception fields.
        f("searchProvider", Enum, WebSearch).yaml("webSearch.searchProvider").enum_of(&["serper", "searxng"]),
        f("serperApiKey", Str, WebSearch).env("SERPER_API_KEY").yaml("webSearch.serperApiKey").secret().bug_exception(),
        f("searxngInstanceUrl", Url, WebSearch).yaml("webSearch.searxngInstanceUrl"),
        f("scraperType", Enum, WebSearch).yaml("webSearch.scraperType").enum_of(&["firecrawl", "serper"]),
        f("firecrawlApiKey", Str, WebSearch).env("FIRECRAWL_API_KEY").yaml("webSearch.firecrawlApiKey").secret().bug_exception(),
        f("firecrawlApiUrl", Url, WebSearch).env("FIRECRAWL_API_URL").yaml("webSearch.firecrawlApiUrl").bug_exception(),
        f("rerankerType", Enum, WebSearch).yaml("webSearch.rerankerType").enum_of(&["jina", "cohere"]),
        f("jinaApiKey", Str, WebSearch).env("JINA_API_KEY").yaml("webSearch.jinaApiKey").secret().bug_exception(),
        f("cohereApiKey", Str, WebSearch).env("COHERE_API_KEY").yaml("webSearch.cohereApiKey").secret().bug_exception(),

        // --- ocr ---
        f("ocrStrategy", Enum, Ocr).yaml("ocr.strategy")
            .enum_of(&["mistral_ocr", "custom_ocr"])
            .default_value(json!("mistral_ocr")),
        f("ocrApiKey", Str, Ocr).env("OCR_API_KEY").yaml("ocr.apiKey").secret().bug_exception(),
        f("ocrBaseUrl", Url, Ocr).env("OCR_BASEURL").yaml("ocr.baseURL").config_path("ocrBaseUrl").bug_exception(),
        f("ocrMistralModel", Str, Ocr).yaml("ocr.mistralModel"),

        // --- speech ---
        f("speechSttProvider", Enum, Speech).enum_of(&["openai", "azure"]).default_value(json!("openai")),
        f("speechSttApiKey", Str, Speech).env("STT_API_KEY").yaml("speech.stt.openai.apiKey").secret().bug_exception(),
        f("speechSttModel", Str, Speech).yaml("speech.stt.openai.model").default_value(json!("whisper-1")),
        f("speechSttUrl", Url, Speech).yaml("speech.stt.openai.url").config_path("speechSttBaseUrl"),
        f("speechTtsProvider", Enum, Speech).enum_of(&["openai", "azure", "elevenlabs"]).default_value(json!("openai")),
        f("speechTtsApiKey", Str, Speech).env("TTS_API_KEY").yaml("speech.tts.openai.apiKey").secret().bug_exception(),
        f("speechTtsModel", Str, Speech).yaml("speech.tts.openai.model").default_value(json!("tts-1")),
        f("speechTtsVoices", Array, Speech).yaml("speech.tts.openai.voices")
            .default_value(json!(["alloy", "echo", "fable", "onyx", "nova", "shimmer"])),

        // --- actions ---
        f("actionsAllowedDomains", Array, Actions).yaml("actions.allowedDomains"),

        // --- mcp ---
        f("mcpServers", Object, Mcp).yaml("mcpServers"),

        // --- model-specs ---
        f("modelSpecsEnforce", Boolean, ModelSpecs).yaml("modelSpecs.enforce").default_value(json!(false)),
        f("modelSpecsPrioritize", Boolean, ModelSpecs).yaml("modelSpecs.prioritize").default_value(json!(false)),
        f("modelSpecsList", Array, ModelSpecs).yaml("modelSpecs.list"),

        // --- file-config ---
        f("fileConfigServerFileSizeLimit", Number, FileConfig)
            .yaml("fileConfig.serverFileSizeLimit")
            .default_value(json!(20))
            .yaml_transform(size_limit_from_yaml),
        f("fileConfigAvatarSizeLimit", Number, FileConfig)
            .yaml("fileConfig.avatarSizeLimit")
            .default_value(json!(2))
            .yaml_transform(size_limit_from_yaml),
        f("fileConfigEndpoints", Object, FileConfig).yaml("fileConfig.endpoints"),

        // --- memory ---
        f("memoryDisabled", Boolean, Memory).yaml("memory.disabled").default_value(json!(false)),
        f("memoryValidKeys", Array, Memory).yaml("memory.validKeys"),
        f("memoryTokenLimit", Number, Memory).yaml("memory.tokenLimit").default_value(json!(10_000)),
        f("memoryPersonalize", Boolean, Memory).yaml("memory.personalize").default_value(json!(true)),
        f("memoryMessageWindowSize", Number, Memory).yaml("memory.messageWindowSize").default_value(json!(5)),

        // --- rate limits (YAML side) ---
        f("rateLimitsFileUploadsIpMax", Number, RateLimit).yaml("rateLimits.fileUploads.ipMax").default_value(json!(100)),
        f("rateLimitsFileUploadsUserMax", Number, RateLimit).yaml("rateLimits.fileUploads.userMax").default_value(json!(50)),
        f("rateLimitsImportIpMax", Number, RateLimit).yaml("rateLimits.conversationsImport.ipMax").default_value(json!(100)),
        f("rateLimitsImportUserMax", Number, RateLimit).yaml("rateLimits.conversationsImport.userMax").default_value(json!(50)),

        // --- endpoints ---
        f("endpointsOpenAiTitleConvo", Boolean, Endpoints).yaml("endpoints.openAI.titleConvo").default_value(json!(true)),
        f("endpointsOpenAiTitleModel", Str, Endpoints).yaml("endpoints.openAI.titleModel").default_value(json!("gpt-4o-mini")),
        f("endpointsAgentsDisableBuilder", Boolean, Endpoints).yaml("endpoints.agents.disableBuilder").default_value(json!(false)),
        f("endpointsAgentsCapabilities", Array, Endpoints).yaml("endpoints.agents.capabilities"),
        f("endpointsAssistantsDisableBuilder", Boolean, Endpoints).yaml("endpoints.assistants.disableBuilder").default_value(json!(false)),
        f("endpointsCustom", Array, Endpoints).yaml("endpoints.custom"),

        // --- misc ---
        f("uid", Number, Misc).env("UID").default_value(json!(1000)),
        f("gid", Number, Misc).env("GID").default_value(json!(1000)),
        f("allowSharedLinks", Boolean, Misc).env("ALLOW_SHARED_LINKS").default_value(json!(true)),
        f("allowSharedLinksPublic", Boolean, Misc).env("ALLOW_SHARED_LINKS_PUBLIC").default_value(json!(true)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldRegistry;

    #[test]
    fn catalog_satisfies_registry_invariants() {
        // Construction performs the full uniqueness validation.
        let registry = FieldRegistry::new(builtin_descriptors()).unwrap();
        assert!(registry.len() > 100);
    }

    #[test]
    fn every_dual_channel_env_exportable_field_is_a_bug_exception() {
        for field in builtin_descriptors() {
            if field.env_key.is_some() && field.yaml_path.is_some() && field.is_env_exportable() {
                assert!(
                    field.librechat_bug_exception,
                    "field '{}' exports to ENV while defining a YAML path",
                    field.id
                );
            }
        }
    }

    #[test]
    fn secret_fields_cover_the_generated_four() {
        let descriptors = builtin_descriptors();
        for key in ["JWT_SECRET", "JWT_REFRESH_SECRET", "CREDS_KEY", "CREDS_IV"] {
            let field = descriptors
                .iter()
                .find(|f| f.env_key == Some(key))
                .unwrap_or_else(|| panic!("missing secret field {key}"));
            assert!(field.secret);
            assert!(field.yaml_path.is_none(), "{key} must be ENV-only");
        }
    }

    #[test]
    fn trust_proxy_transformer_accepts_legacy_booleans() {
        assert_eq!(trust_proxy_from_env("true"), json!(1));
        assert_eq!(trust_proxy_from_env("false"), json!(0));
        assert_eq!(trust_proxy_from_env("3"), json!(3));
        assert_eq!(trust_proxy_from_env("garbage"), json!(1));
    }

    #[test]
    fn size_limit_transformer_unquotes_numbers() {
        assert_eq!(size_limit_from_yaml(&json!("25")), json!(25));
        assert_eq!(size_limit_from_yaml(&json!(25)), json!(25));
        assert_eq!(size_limit_from_yaml(&json!("not a number")), json!("not a number"));
    }
}
