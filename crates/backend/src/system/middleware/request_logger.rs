use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use contracts::shared::format::group_digits;

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время, длительность (ms), размер ответа, статус код,
/// метод и путь. Ответ буферизуется целиком, чтобы узнать реальный размер.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("Failed to buffer response for {} {}: {}", method, uri.path(), e);
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                Local::now().format("%H:%M:%S"),
                start.elapsed().as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    // Голубой для 2xx, коричневый для остальных
    let color_code = if parts.status.is_success() { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        group_digits(&bytes.len().to_string(), '.'),
        parts.status.as_u16(),
        method,
        uri.path()
    );

    Response::from_parts(parts, Body::from(bytes))
}
