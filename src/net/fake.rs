//! In-memory [`HttpClient`] for unit tests.

use std::sync::Mutex;

use crate::{
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    net::http::{HttpClient, HttpResponse},
};

/// Answers by longest matching URL prefix; unmatched URLs get a 404.
#[derive(Debug, Default)]
pub struct FakeHttp {
    routes: Vec<(String, Result<HttpResponse, String>)>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: &str, response: HttpResponse) -> Self {
        self.routes.push((prefix.to_string(), Ok(response)));
        self
    }

    pub fn fail(mut self, prefix: &str, message: &str) -> Self {
        self.routes.push((prefix.to_string(), Err(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for FakeHttp {
    async fn get(&self, url: &str) -> ShopkeeperResult<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        let hit = self
            .routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());
        match hit {
            Some((_, Ok(response))) => Ok(response.clone()),
            Some((_, Err(message))) => Err(ShopkeeperError::Other(anyhow::anyhow!(
                "{message}"
            ))),
            None => Ok(HttpResponse::status(404)),
        }
    }
}

/// PNG bytes of a solid `width`×`height` image.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
