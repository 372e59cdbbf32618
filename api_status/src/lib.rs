use actix_web::web;

pub mod routes {
    pub mod status;
}

mod services {
    pub(crate) mod status;
}

mod dtos {
    pub(crate) mod status;
}

pub fn mount_status(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::status::post_check_subscription);
}
