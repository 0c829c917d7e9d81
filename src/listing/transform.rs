use std::sync::Arc;

type MapFn<A, B> = Arc<dyn Fn(A) -> B + Send + Sync>;

/// The two pure conversions around a fetch: filters to request parameters,
/// raw response to the published result.
///
/// `Transforms::default()` is the identity on both sides.
pub struct Transforms<F, P, R, O> {
    request: MapFn<F, P>,
    response: MapFn<R, O>,
}

impl<F, R> Transforms<F, F, R, R>
where
    F: 'static,
    R: 'static,
{
    pub fn identity() -> Self {
        Self {
            request: Arc::new(|filters: F| filters),
            response: Arc::new(|response: R| response),
        }
    }
}

impl<F, R> Default for Transforms<F, F, R, R>
where
    F: 'static,
    R: 'static,
{
    fn default() -> Self {
        Self::identity()
    }
}

impl<F, P, R, O> Transforms<F, P, R, O> {
    /// Replace the request-side conversion.
    pub fn request<Q, M>(self, map: M) -> Transforms<F, Q, R, O>
    where
        M: Fn(F) -> Q + Send + Sync + 'static,
    {
        Transforms {
            request: Arc::new(map),
            response: self.response,
        }
    }

    /// Replace the response-side conversion.
    pub fn response<T, M>(self, map: M) -> Transforms<F, P, R, T>
    where
        M: Fn(R) -> T + Send + Sync + 'static,
    {
        Transforms {
            request: self.request,
            response: Arc::new(map),
        }
    }

    pub fn to_request_params(&self, filters: F) -> P {
        (self.request)(filters)
    }

    pub fn to_resulting_response(&self, response: R) -> O {
        (self.response)(response)
    }
}

impl<F, P, R, O> Clone for Transforms<F, P, R, O> {
    fn clone(&self) -> Self {
        Self {
            request: Arc::clone(&self.request),
            response: Arc::clone(&self.response),
        }
    }
}
