// Transport double and image bytes for the command tests.

use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::Mutex;

use stockchart_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

#[derive(Clone)]
enum Reply {
    Respond(Result<HttpResponse, HttpError>),
    Stall,
}

/// Answers by URL substring; unmatched requests get a 404. A stalled route
/// never answers.
#[derive(Default)]
pub struct StubHttpClient {
    routes: Vec<(String, Reply)>,
    urls: Mutex<Vec<String>>,
}

impl StubHttpClient {
    pub fn respond(mut self, needle: &str, response: Result<HttpResponse, HttpError>) -> Self {
        self.routes
            .push((needle.to_owned(), Reply::Respond(response)));
        self
    }

    pub fn stall(mut self, needle: &str) -> Self {
        self.routes.push((needle.to_owned(), Reply::Stall));
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .expect("url store should not be poisoned")
            .clone()
    }
}

impl HttpClient for StubHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let reply = self
            .routes
            .iter()
            .find(|(needle, _)| request.url.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());
        self.urls
            .lock()
            .expect("url store should not be poisoned")
            .push(request.url);

        Box::pin(async move {
            match reply {
                Some(Reply::Respond(response)) => response,
                Some(Reply::Stall) => std::future::pending().await,
                None => Ok(HttpResponse::new(404, Vec::new())),
            }
        })
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([0, 128, 0]));
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("png encoding should succeed");
    cursor.into_inner()
}
