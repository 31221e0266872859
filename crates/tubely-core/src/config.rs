//! Configuration module
//!
//! Settings are read from the process environment (after loading an optional `.env`
//! file via `dotenvy`). Everything except `JWT_SECRET` and `DATABASE_URL` has a default.

use std::env;
use std::path::PathBuf;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const DB_MAX_CONNECTIONS: u32 = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const LOCAL_STORAGE_NAMESPACE: &str = "local";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    // Video publication backend
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub local_storage_namespace: String,
    pub local_signing_secret: String,
    // Thumbnails
    pub assets_root: PathBuf,
    pub public_base_url: String,
    // Ingestion
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub scratch_dir: PathBuf,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(SERVER_PORT);

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DB_MAX_CONNECTIONS);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse::<StorageBackend>()?,
            Err(_) => StorageBackend::S3,
        };

        let max_video_size_mb = env::var("MAX_VIDEO_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_VIDEO_SIZE_MB);
        let max_thumbnail_size_mb = env::var("MAX_THUMBNAIL_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_THUMBNAIL_SIZE_MB);

        let local_signing_secret =
            env::var("LOCAL_SIGNING_SECRET").unwrap_or_else(|_| jwt_secret.clone());

        let config = Config {
            server_port,
            environment,
            cors_origins,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            jwt_secret,
            database_url,
            db_max_connections,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            local_storage_namespace: env::var("LOCAL_STORAGE_NAMESPACE")
                .unwrap_or_else(|_| LOCAL_STORAGE_NAMESPACE.to_string()),
            local_signing_secret,
            assets_root: env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port)),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            max_video_size_bytes: max_video_size_mb * 1024 * 1024,
            max_thumbnail_size_bytes: max_thumbnail_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET cannot be empty"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.as_deref().unwrap_or("").is_empty() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET is required when STORAGE_BACKEND=s3"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION is required when STORAGE_BACKEND=s3"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL are required when STORAGE_BACKEND=local"
                    ));
                }
                if self.local_storage_namespace.is_empty()
                    || self.local_storage_namespace.contains(',')
                {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_NAMESPACE must be non-empty and must not contain ','"
                    ));
                }
            }
        }

        for (name, path) in [
            ("FFPROBE_PATH", &self.ffprobe_path),
            ("FFMPEG_PATH", &self.ffmpeg_path),
        ] {
            if path.is_empty() || !is_safe_executable_path(path) {
                return Err(anyhow::anyhow!("{} contains unsafe characters", name));
            }
        }

        if !["text", "json"].contains(&self.log_format.as_str()) {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'text' or 'json'"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    /// Bucket (or local namespace) that new uploads are published into.
    pub fn publish_namespace(&self) -> &str {
        match self.storage_backend {
            StorageBackend::S3 => self.s3_bucket.as_deref().unwrap_or_default(),
            StorageBackend::Local => &self.local_storage_namespace,
        }
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

/// Tool paths are passed straight to `Command::new`; keep them to a conservative alphabet.
fn is_safe_executable_path(path: &str) -> bool {
    !path.contains("..")
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            log_format: "text".to_string(),
            jwt_secret: "secret".to_string(),
            database_url: "postgres://localhost/tubely".to_string(),
            db_max_connections: DB_MAX_CONNECTIONS,
            storage_backend: StorageBackend::S3,
            s3_bucket: Some("tubely-media".to_string()),
            s3_region: Some("us-east-1".to_string()),
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            local_storage_namespace: LOCAL_STORAGE_NAMESPACE.to_string(),
            local_signing_secret: "secret".to_string(),
            assets_root: PathBuf::from("./assets"),
            public_base_url: "http://localhost:8091".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "/usr/bin/ffmpeg".to_string(),
            scratch_dir: env::temp_dir(),
            max_video_size_bytes: MAX_VIDEO_SIZE_MB * 1024 * 1024,
            max_thumbnail_size_bytes: MAX_THUMBNAIL_SIZE_MB * 1024 * 1024,
        }
    }

    #[test]
    fn test_valid_s3_config() {
        let config = base_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.publish_namespace(), "tubely-media");
    }

    #[test]
    fn test_s3_requires_bucket() {
        let mut config = base_config();
        config.s3_bucket = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_local_backend_requires_paths() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::Local;
        assert!(config.validate().is_err());

        config.local_storage_path = Some("/var/lib/tubely".to_string());
        config.local_storage_base_url = Some("http://localhost:8091/media".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.publish_namespace(), "local");
    }

    #[test]
    fn test_rejects_unsafe_tool_paths() {
        let mut config = base_config();
        config.ffmpeg_path = "ffmpeg; rm -rf /".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.ffprobe_path = "../ffprobe".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_detection() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
