//! The [`HdbTransport`] trait.
use std::{
    io,
    task::{Context, Poll},
};

use crate::{
    Result,
    protocol::{Reply, Request},
};

#[cfg(test)]
pub(crate) mod mock;

/// A buffered stream which can send requests and receive replies.
///
/// Message and segment headers, as well as socket io, are the implementor
/// concern.
pub trait HdbTransport: Unpin {
    /// Poll to flush the underlying io.
    fn poll_flush(&mut self, cx: &mut Context) -> Poll<io::Result<()>>;

    /// Poll to receive a reply.
    ///
    /// Calling `poll_recv` will also try to [`poll_flush`][1] if there is buffered request.
    ///
    /// Replies are returned as is, server errors are parts of the reply.
    ///
    /// [1]: HdbTransport::poll_flush
    fn poll_recv(&mut self, cx: &mut Context) -> Poll<Result<Reply>>;

    /// Send request to the server.
    ///
    /// Note that this send is buffered, caller must also call
    /// [`poll_flush`][1] or [`flush`][2] afterwards.
    ///
    /// [1]: HdbTransport::poll_flush
    /// [2]: HdbTransportExt::flush
    fn send(&mut self, request: Request);
}

impl<P> HdbTransport for &mut P where P: HdbTransport {
    fn poll_flush(&mut self, cx: &mut Context) -> Poll<io::Result<()>> {
        P::poll_flush(self, cx)
    }

    fn poll_recv(&mut self, cx: &mut Context) -> Poll<Result<Reply>> {
        P::poll_recv(self, cx)
    }

    fn send(&mut self, request: Request) {
        P::send(self, request);
    }
}

/// An extension trait to provide `Future` API for [`HdbTransport`].
pub trait HdbTransportExt: HdbTransport {
    /// Flush the underlying io.
    fn flush(&mut self) -> impl Future<Output = io::Result<()>> {
        std::future::poll_fn(|cx|self.poll_flush(cx))
    }

    /// Receive a reply.
    fn recv(&mut self) -> impl Future<Output = Result<Reply>> {
        std::future::poll_fn(|cx|self.poll_recv(cx))
    }
}

impl<T> HdbTransportExt for T where T: HdbTransport { }
