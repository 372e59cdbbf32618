use actix_web::web;

pub mod routes {
    pub mod chat;
}

mod services {
    pub(crate) mod chat;
}

mod dtos {
    pub(crate) mod chat;
}

pub fn mount_chat(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::chat::post_bible_chat);
}
