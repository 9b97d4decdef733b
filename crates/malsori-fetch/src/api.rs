use serde::Deserialize;

/// One page of the dictionary search response.
///
/// Only the fields the fetch pass reads are modeled; the API returns far
/// more. Unknown fields are ignored by serde.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub pager_info: PagerInfo,
    pub search_result_map: SearchResultMap,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerInfo {
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultMap {
    pub search_result_list_map: SearchResultListMap,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultListMap {
    #[serde(rename = "WORD")]
    pub word: WordResults,
}

#[derive(Debug, Deserialize)]
pub struct WordResults {
    pub items: Vec<SearchItem>,
}

/// A single search hit: a headword plus its pronunciation assets, if any.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub handle_entry: String,
    #[serde(default)]
    pub search_phonetic_symbol_list: Vec<PhoneticSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneticSymbol {
    #[serde(default)]
    pub phonetic_symbol_path: Option<String>,
}

impl SearchResponse {
    /// The result items on this page.
    pub fn items(&self) -> &[SearchItem] {
        &self.search_result_map.search_result_list_map.word.items
    }
}

impl SearchItem {
    /// The audio path of the first phonetic symbol, if present and non-empty.
    ///
    /// The API lists several symbols per entry; only the first carries the
    /// headword pronunciation, the rest are conjugated forms.
    pub fn audio_path(&self) -> Option<&str> {
        self.search_phonetic_symbol_list
            .first()
            .and_then(|symbol| symbol.phonetic_symbol_path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "pagerInfo": { "totalPages": 3, "page": 1 },
            "searchResultMap": {
                "searchResultListMap": {
                    "WORD": {
                        "items": [
                            {
                                "handleEntry": "사과",
                                "searchPhoneticSymbolList": [
                                    { "phoneticSymbolPath": "//audio/사과.mp3" }
                                ]
                            },
                            {
                                "handleEntry": "사과나무",
                                "searchPhoneticSymbolList": []
                            }
                        ]
                    }
                }
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pager_info.total_pages, 3);
        assert_eq!(response.items().len(), 2);
        assert_eq!(response.items()[0].handle_entry, "사과");
        assert_eq!(response.items()[0].audio_path(), Some("//audio/사과.mp3"));
        assert_eq!(response.items()[1].audio_path(), None);
    }

    #[test]
    fn test_empty_audio_path_is_none() {
        let item: SearchItem = serde_json::from_str(
            r#"{
                "handleEntry": "배",
                "searchPhoneticSymbolList": [{ "phoneticSymbolPath": "" }]
            }"#,
        )
        .unwrap();
        assert_eq!(item.audio_path(), None);
    }

    #[test]
    fn test_missing_symbol_list_is_none() {
        let item: SearchItem = serde_json::from_str(r#"{ "handleEntry": "배" }"#).unwrap();
        assert_eq!(item.audio_path(), None);
    }
}
