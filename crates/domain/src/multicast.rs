use crate::errors::DomainError;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

/// An IP address known to be inside the IPv4 (224.0.0.0/4) or IPv6 (ff00::/8)
/// multicast range. The only way to get one is through validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MulticastAddr(IpAddr);

impl MulticastAddr {
    pub fn ip(&self) -> IpAddr {
        self.0
    }

    pub fn is_ipv4(&self) -> bool {
        self.0.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.0.is_ipv6()
    }
}

impl TryFrom<IpAddr> for MulticastAddr {
    type Error = DomainError;

    fn try_from(ip: IpAddr) -> Result<Self, Self::Error> {
        if ip.is_multicast() {
            Ok(Self(ip))
        } else {
            Err(DomainError::NotMulticast(ip.to_string()))
        }
    }
}

impl FromStr for MulticastAddr {
    type Err = DomainError;

    /// Accepts an IPv6 zone suffix (`ff02::fb%eth0`). The zone must be
    /// non-empty and is dropped; it is rejected on IPv4 addresses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedAddress(s.to_string());

        let ip = match s.split_once('%') {
            Some((addr, zone)) if !zone.is_empty() => {
                Ipv6Addr::from_str(addr).map(IpAddr::V6).map_err(|_| malformed())?
            }
            Some(_) => return Err(malformed()),
            None => IpAddr::from_str(s).map_err(|_| malformed())?,
        };
        if !ip.is_multicast() {
            return Err(DomainError::NotMulticast(s.to_string()));
        }
        Ok(Self(ip))
    }
}

impl From<MulticastAddr> for IpAddr {
    fn from(addr: MulticastAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for MulticastAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a list of multicast group tokens.
///
/// Tokens are trimmed; blank ones are skipped. The first token that is not an
/// IP address, or is an IP address outside the multicast range, rejects the
/// whole batch. Input order is preserved and an empty input yields an empty
/// vector.
pub fn parse_multicast_groups<I, S>(tokens: I) -> Result<Vec<MulticastAddr>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();

    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        groups.push(token.parse::<MulticastAddr>()?);
    }

    Ok(groups)
}
