use anyhow::{Ok, Result};
use chanolja::domain::value_objects::split::DEFAULT_BRANCH_SHARE_PERCENT;

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = super::config_model::Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let supabase = super::config_model::Supabase {
        project_url: std::env::var("SUPABASE_PROJECT_URL")
            .expect("SUPABASE_PROJECT_URL is invalid"),
        service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .expect("SUPABASE_SERVICE_ROLE_KEY is invalid"),
        jwt_secret: std::env::var("SUPABASE_JWT_SECRET").expect("SUPABASE_JWT_SECRET is invalid"),
    };

    let toss = super::config_model::Toss {
        secret_key: std::env::var("TOSS_SECRET_KEY").expect("TOSS_SECRET_KEY is invalid"),
        webhook_secret: std::env::var("TOSS_WEBHOOK_SECRET")
            .expect("TOSS_WEBHOOK_SECRET is invalid"),
    };

    let settlement = super::config_model::Settlement {
        default_submerchant_id: std::env::var("DEFAULT_SUBMERCHANT_ID")
            .expect("DEFAULT_SUBMERCHANT_ID is invalid"),
        hq_submerchant_id: std::env::var("HQ_SUBMERCHANT_ID")
            .expect("HQ_SUBMERCHANT_ID is invalid"),
        branch_split_percent: std::env::var("BRANCH_SPLIT_PERCENT")
            .unwrap_or_else(|_| DEFAULT_BRANCH_SHARE_PERCENT.to_string())
            .parse()?,
    };

    let site = super::config_model::Site {
        public_base_url: std::env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL is invalid"),
        kakao_rest_api_key: std::env::var("KAKAO_REST_API_KEY").ok(),
        naver_map_client_id: std::env::var("NAVER_MAP_CLIENT_ID").ok(),
    };

    Ok(DotEnvyConfig {
        server,
        supabase,
        toss,
        settlement,
        site,
    })
}
