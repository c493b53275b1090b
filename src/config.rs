use std::env;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    /// Offset used to decide which calendar day "today" is. Defaults to JST.
    pub utc_offset_minutes: i32,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_timeout_secs: u64,

    // 0 disables the scheduled generation worker
    pub ai_generation_interval_secs: u64,
    pub generate_rate_limit_per_hour: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            utc_offset_minutes: env::var("APP_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "540".into())
                .parse()
                .expect("APP_UTC_OFFSET_MINUTES must be a number"),

            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            openai_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),

            ai_generation_interval_secs: env::var("AI_GENERATION_INTERVAL_SECS")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .unwrap_or(0),
            generate_rate_limit_per_hour: env::var("GENERATE_RATE_LIMIT_PER_HOUR")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .unwrap_or(5),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Calendar date at the configured offset. Never goes through a UTC date.
    pub fn local_today(&self) -> NaiveDate {
        self.local_date_at(Utc::now())
    }

    pub fn local_date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset()).date_naive()
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/kyukanbi_test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:5173".into(),
            jwt_secret: "test-secret".into(),
            utc_offset_minutes: 540,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".into(),
            openai_base_url: "http://127.0.0.1:1".into(),
            openai_timeout_secs: 5,
            ai_generation_interval_secs: 0,
            generate_rate_limit_per_hour: 5,
        }
    }
}
