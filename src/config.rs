use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Base64-encoded HMAC key used to sign bearer tokens.
    pub auth_secret: String,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub file_download_path: PathBuf,
    pub upload_dir: PathBuf,
    pub mail_to: String,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cityinfo.db?mode=rwc".to_string()),
            auth_secret: env::var("AUTH_SECRET_FOR_KEY")
                .expect("AUTH_SECRET_FOR_KEY must be set"),
            auth_issuer: env::var("AUTH_ISSUER")
                .unwrap_or_else(|_| "https://localhost:7169".to_string()),
            auth_audience: env::var("AUTH_AUDIENCE")
                .unwrap_or_else(|_| "cityinfoapi".to_string()),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            file_download_path: env::var("FILE_DOWNLOAD_PATH")
                .unwrap_or_else(|_| "getting-started-with-rest-slides.pdf".to_string())
                .into(),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            mail_to: env::var("MAIL_TO")
                .unwrap_or_else(|_| "admin@mycompany.com".to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@mycompany.com".to_string()),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
