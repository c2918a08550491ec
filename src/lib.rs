pub mod core;
pub mod analysis;
pub mod index;
pub mod query;
pub mod scoring;
pub mod search;
pub mod engine;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                        INVERTEX STRUCT ARCHITECTURE                      │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── ENGINE ─────────────────────────────────┐
│                                                                          │
│  ┌────────────────────────────────────────────────────────────────┐    │
│  │                       struct Engine                             │    │
│  │  ┌──────────────────────────────────────────────────────────┐ │    │
│  │  │ state: RwLock<EngineState>  // analyzer + inverted index │ │    │
│  │  │ executor: QueryExecutor     // stateless query evaluation│ │    │
│  │  │ cache: QueryCache           // LRU result cache          │ │    │
│  │  │ config: EngineConfig                                     │ │    │
│  │  │ start_time: Instant                                      │ │    │
│  │  │ query_count: AtomicU64                                   │ │    │
│  │  │ write_count: AtomicU64                                   │ │    │
│  │  └──────────────────────────────────────────────────────────┘ │    │
│  └────────────────────────────────────────────────────────────────┘    │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── ANALYSIS LAYER ─────────────────────────────┐
│                                                                          │
│  ┌──────────────────────┐  ┌──────────────────┐  ┌──────────────────┐  │
│  │ struct Analyzer      │  │ struct Token     │  │ trait Tokenizer  │  │
│  │ • tokenizer: Box<>   │  │ • text: String   │  │ • tokenize()     │  │
│  │ • filters: Vec<Box>  │  │ • position: u32  │  └──────────────────┘  │
│  │ • analyze()          │  │ • offset: usize  │                        │
│  └──────────────────────┘  └──────────────────┘  ┌──────────────────┐  │
│                                                  │ trait TokenFilter│  │
│  ┌──────────────────────┐  ┌──────────────────┐  │ • filter()       │  │
│  │ struct StopWordFilter│  │ struct           │  └──────────────────┘  │
│  │ • stop_words: Set    │  │ ConflationFilter │                        │
│  └──────────────────────┘  │ • table: HashMap │                        │
│                            └──────────────────┘                        │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── INDEXING LAYER ─────────────────────────────┐
│                                                                          │
│  ┌────────────────────────────────────────────────────────────────┐    │
│  │                     struct InvertedIndex                        │    │
│  │  ┌──────────────────────────────────────────────────────────┐ │    │
│  │  │ postings: HashMap<String, PostingList> // stem → postings│ │    │
│  │  │ docs: HashMap<DocId, DocEntry>         // live documents │ │    │
│  │  │ total_tokens: usize                                      │ │    │
│  │  └──────────────────────────────────────────────────────────┘ │    │
│  └────────────────────────────────────────────────────────────────┘    │
│                                                                          │
│  ┌──────────────────┐  ┌─────────────────────┐  ┌──────────────────┐   │
│  │ struct Posting   │  │ struct PostingList  │  │ struct           │   │
│  │ • doc_id: DocId  │  │ • postings: Vec<>   │  │ PostingEntry     │   │
│  │ • positions: Vec │  │   (sorted by doc_id)│  │ • stem, postings │   │
│  └──────────────────┘  └─────────────────────┘  └──────────────────┘   │
└──────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────── SEARCH LAYER ──────────────────────────────┐
│                                                                          │
│  ┌─────────────────────┐  ┌──────────────────────┐                      │
│  │ enum Query (AST)    │  │ struct QueryParser   │                      │
│  │ • Term(String)      │  │ • lexer + recursive  │                      │
│  │ • And(Vec<Query>)   │  │   descent            │                      │
│  │ • Or(Vec<Query>)    │  │ • tolerant fallback  │                      │
│  │ • Not(Box<Query>)   │  └──────────────────────┘                      │
│  │ • Phrase(Vec<Stem>) │  ┌──────────────────────┐                      │
│  │ • Near{stems, k}    │  │ struct QueryExecutor │                      │
│  └─────────────────────┘  │ • execute() → DocIds │                      │
│                           └──────────────────────┘                      │
│  ┌─────────────────────┐  ┌──────────────────────┐  ┌───────────────┐  │
│  │ trait Scorer        │  │ struct ScoredDocument│  │ struct        │  │
│  │ • FrequencyScorer   │  │ • doc_id, score      │  │ TopKCollector │  │
│  │ • CoverDensityScorer│  └──────────────────────┘  │ • heap, k     │  │
│  └─────────────────────┘                            └───────────────┘  │
└──────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── DATA FLOW ───────────────────────────────┐
│                                                                          │
│  index(): text ──Tokenizer──> StopWordFilter ──> ConflationFilter       │
│               ──renumber positions──> InvertedIndex::upsert             │
│                                                                          │
│  search(): query ──same analysis──> QueryParser ──> Query AST           │
│               ──QueryExecutor──> candidate DocIds ──Scorer──>           │
│               TopKCollector ──> SearchResults                           │
└──────────────────────────────────────────────────────────────────────────┘
*/
