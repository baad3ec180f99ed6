use std::sync::Arc;
use tracing::info;
use tunrelay_application::services::DnsInterceptor;
use tunrelay_application::use_cases::InterceptDnsSessionUseCase;
use tunrelay_domain::Config;
use tunrelay_infrastructure::dns::TcpUpstreamResolver;

pub struct DnsServices {
    pub interceptor: DnsInterceptor,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = Arc::new(TcpUpstreamResolver::from_config(&config.relay)?);

        info!(
            upstream = %resolver.server_addr(),
            timeout_secs = config.relay.query_timeout,
            "Initializing DNS relay"
        );

        let use_case = Arc::new(
            InterceptDnsSessionUseCase::new(resolver)
                .with_buffer_size(config.relay.read_buffer_size),
        );

        Ok(Self {
            interceptor: DnsInterceptor::new(use_case),
        })
    }
}
