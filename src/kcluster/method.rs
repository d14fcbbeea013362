use serde::Deserialize;
use serde::Serialize;

/// How a cluster center is computed from its members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Center {
    #[default]
    Mean,
    Median,
}

/// How the first centers of a restart are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Init {
    /// k-means++: each next center drawn proportional to squared distance.
    #[default]
    PlusPlus,
    /// Centroids of a random balanced assignment.
    Random,
}

/// Centroid method selector of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub center: Center,
    pub init: Init,
}

impl Method {
    pub fn new(center: Center, init: Init) -> Self {
        Self { center, init }
    }

    /// Single-character code: `a` mean, `b` mean with k-means++, `m` median.
    pub fn code(&self) -> char {
        match (self.center, self.init) {
            (Center::Median, _) => 'm',
            (Center::Mean, Init::PlusPlus) => 'b',
            (Center::Mean, Init::Random) => 'a',
        }
    }
}

impl TryFrom<char> for Method {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a' => Ok(Self::new(Center::Mean, Init::Random)),
            'b' => Ok(Self::new(Center::Mean, Init::PlusPlus)),
            'm' => Ok(Self::new(Center::Median, Init::Random)),
            other => Err(anyhow::anyhow!("unknown method code {}", other)),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let center = match self.center {
            Center::Mean => "mean",
            Center::Median => "median",
        };
        let init = match self.init {
            Init::PlusPlus => "kmeans++",
            Init::Random => "random",
        };
        write!(f, "{}/{}", center, init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(Method::default().code(), 'b');
        assert_eq!(Method::new(Center::Mean, Init::Random).code(), 'a');
        assert_eq!(Method::new(Center::Median, Init::PlusPlus).code(), 'm');
        assert_eq!(Method::try_from('m').unwrap().center, Center::Median);
        assert!(Method::try_from('z').is_err());
    }
}
