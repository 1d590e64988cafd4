//! Transport layer that logs every JSON-RPC request passing through it,
//! tagged with the label of the provider that issued it.
use {
    alloy::{
        rpc::json_rpc::{RequestPacket, ResponsePacket},
        transports::TransportError,
    },
    std::{
        fmt::Debug,
        pin::Pin,
        task::{Context, Poll},
    },
    tower::{Layer, Service},
};

pub(crate) struct LoggingLayer {
    pub label: String,
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService {
            inner,
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoggingService<S> {
    inner: S,
    label: String,
}

impl<S> Service<RequestPacket> for LoggingService<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let methods: Vec<String> = match &req {
            RequestPacket::Single(request) => vec![request.method().to_string()],
            RequestPacket::Batch(requests) => requests
                .iter()
                .map(|request| request.method().to_string())
                .collect(),
        };
        let label = self.label.clone();
        tracing::trace!(%label, ?methods, "executing request");

        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await;
            if let Err(err) = &res {
                tracing::debug!(%label, ?methods, ?err, "request failed");
            }
            res
        })
    }
}
