use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::SinkExt;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    net::{TcpListener, TcpStream, ToSocketAddrs},
};
use tokio_util::codec::FramedWrite;

use crate::{
    error::{RequestError, ResponseError},
    http::{codec::ResponseCodec, Limits, Request, Response},
};

type Handler<A, F> = fn(Request, A) -> F;

/// Pause after a failed accept, so running out of descriptors does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server<A, F> {
    state: A,
    handler: Handler<A, F>,
    limits: Limits,
    read_timeout: Duration,
}

impl<S, F> Server<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Future<Output = Result<Response, ResponseError>> + Send + 'static,
{
    pub fn new(state: S, handler: Handler<S, F>) -> Self {
        Self {
            state,
            handler,
            limits: Limits::default(),
            read_timeout: crate::TIMEOUT_DURATION,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub async fn bind<A: ToSocketAddrs>(self, addr: A) -> io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Accepts connections forever, each one handled on its own task.
    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        let server = Arc::new(self);

        let addr = listener.local_addr()?;
        tracing::info!(target: "listener", ?addr, "server is running");

        loop {
            let (socket, addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    accept_failed(&err).await;
                    continue;
                }
            };

            let server = server.clone();
            tokio::spawn(async move {
                server.handle_connection(socket, addr).await;
            });
        }
    }

    #[tracing::instrument(skip(self, socket))]
    async fn handle_connection(self: Arc<Self>, socket: TcpStream, addr: SocketAddr) {
        let (mut reader, writer) = socket.into_split();

        let req = match self.read_request(&mut reader).await {
            Ok(req) => {
                tracing::debug!(?req, "received request");
                req
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read request");
                return;
            }
        };

        if let Err(err) = self.respond(req, writer).await {
            tracing::warn!(%err, "failed to send response");
        }
    }

    async fn read_request<R>(&self, reader: &mut R) -> Result<Request, RequestError>
    where
        R: AsyncRead + Unpin,
    {
        tokio::time::timeout(self.read_timeout, Request::read(reader, &self.limits))
            .await
            .map_err(|_| RequestError::Timeout)?
    }

    async fn respond<W>(&self, req: Request, writer: W) -> Result<(), ResponseError>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            target: "requests",
            method = %req.method(),
            path = req.target(),
            r#""{} {}" {}"#, req.method(), req.target(), req.version()
        );

        let resp = (self.handler)(req, self.state.clone()).await?;
        tracing::debug!(?resp, "sending response");

        let mut codec = FramedWrite::new(writer, ResponseCodec);
        codec.send(resp).await?;
        codec.into_inner().shutdown().await?;

        Ok(())
    }
}

async fn accept_failed(err: &io::Error) {
    tracing::warn!(target: "listener", %err, "failed to accept connection");
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}
