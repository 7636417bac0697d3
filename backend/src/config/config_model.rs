#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub supabase: Supabase,
    pub toss: Toss,
    pub settlement: Settlement,
    pub site: Site,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Supabase {
    pub project_url: String,
    pub service_role_key: String,
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct Toss {
    pub secret_key: String,
    pub webhook_secret: String,
}

#[derive(Debug, Clone)]
pub struct Settlement {
    pub default_submerchant_id: String,
    pub hq_submerchant_id: String,
    pub branch_split_percent: i64,
}

#[derive(Debug, Clone)]
pub struct Site {
    pub public_base_url: String,
    pub kakao_rest_api_key: Option<String>,
    pub naver_map_client_id: Option<String>,
}
