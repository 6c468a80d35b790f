//! Default TOML config template.

/// Generate the default TOML config content with comments.
pub fn default_config_toml() -> String {
    r##"# chatload configuration
# Only override what you want to change -- missing fields use defaults.
# Environment variables (CHATLOAD_*) override this file; CLI flags override both.

[target]
# base_url = "http://localhost/v1"   # requests go to {base_url}/chat-messages
# app_id = ""                        # required (CHATLOAD_APP_ID)
# api_token = ""                     # required (CHATLOAD_API_TOKEN)

[load]
# users = 10                 # concurrent virtual users (1-10000)
# duration_secs = 60         # 0 = bounded by iterations only
# iterations = 0             # per user, 0 = bounded by duration only
# ramp_up_secs = 0           # spread user start over this window
# request_timeout_secs = 60  # whole streamed response (1-3600)
# connect_timeout_secs = 10  # TCP/TLS connect (1-300)
# pause_min_secs = 1.0       # randomized think time after each iteration
# pause_max_secs = 3.0

[queries]
# pool = [
#     "Hello, what can you help me with?",
#     "What are the next steps?",
# ]

[output]
# summary_path = "summary.json"
"##
    .to_string()
}
